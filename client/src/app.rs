//! Root application component with routing and the session provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::admin_dashboard::{AdminDashboardPage, AdminMarksPage};
use crate::pages::admin_students::AdminStudentsPage;
use crate::pages::admin_teachers::AdminTeachersPage;
use crate::pages::home::{ContactPage, HomePage};
use crate::pages::login::{AdminLoginPage, StudentLoginPage, TeacherLoginPage};
use crate::pages::oauth_callback::OAuthCallbackPage;
use crate::pages::password::{ForgotPasswordPage, ResetPasswordPage};
use crate::pages::signup::AdminSignupPage;
use crate::pages::student_dashboard::StudentDashboardPage;
use crate::pages::student_tests::StudentTestsPage;
use crate::pages::teacher_attendance::TeacherAttendancePage;
use crate::pages::teacher_classroom::TeacherClassroomPage;
use crate::pages::teacher_dashboard::TeacherDashboardPage;
use crate::pages::teacher_marks::TeacherMarksPage;
use crate::pages::teacher_tests::TeacherTestsPage;
use crate::state::session::{AuthContext, BrowserSessionStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the `AuthContext` and restores it from session storage once the
/// app is running in the browser. Until then role-gated pages render their
/// "checking session" state.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new();
    provide_context(auth);
    Effect::new(move || auth.restore(&BrowserSessionStore));

    view! {
        <Stylesheet id="leptos" href="/pkg/gradyze.css"/>
        <Title text="Gradyze"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("contact") view=ContactPage/>
                <Route path=StaticSegment("adminlogin") view=AdminLoginPage/>
                <Route path=StaticSegment("adminsignup") view=AdminSignupPage/>
                <Route path=StaticSegment("teacherlogin") view=TeacherLoginPage/>
                <Route path=StaticSegment("studentlogin") view=StudentLoginPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=(StaticSegment("reset-password"), ParamSegment("token")) view=ResetPasswordPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=OAuthCallbackPage/>

                <Route path=StaticSegment("admindash") view=AdminDashboardPage/>
                <Route path=(StaticSegment("admindash"), StaticSegment("students")) view=AdminStudentsPage/>
                <Route path=(StaticSegment("admindash"), StaticSegment("teachers")) view=AdminTeachersPage/>
                <Route path=(StaticSegment("admindash"), StaticSegment("marks")) view=AdminMarksPage/>

                <Route path=StaticSegment("teacherdash") view=TeacherDashboardPage/>
                <Route path=(StaticSegment("teacherdash"), StaticSegment("marks")) view=TeacherMarksPage/>
                <Route path=(StaticSegment("teacherdash"), StaticSegment("attendance")) view=TeacherAttendancePage/>
                <Route path=(StaticSegment("teacherdash"), StaticSegment("tests")) view=TeacherTestsPage/>
                <Route path=(StaticSegment("teacherdash"), StaticSegment("classroom")) view=TeacherClassroomPage/>

                <Route path=StaticSegment("studentdash") view=StudentDashboardPage/>
                <Route path=(StaticSegment("studentdash"), StaticSegment("tests")) view=StudentTestsPage/>
            </Routes>
        </Router>
    }
}
