use axum::response::Html;
use pkce_auth_axum::{AuthToken, PKCE_ROUTE_PREFIX};

fn page(body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>PKCE demo</title></head>
<body>
{body}
</body>
</html>"#
    ))
}

pub(crate) async fn index(token: Option<AuthToken>) -> Html<String> {
    let prefix = PKCE_ROUTE_PREFIX.as_str();
    match token {
        Some(_) => page(&format!(
            r#"<h1>Signed in</h1>
<p><a href="/protected">Protected page</a></p>
<p><a href="{prefix}/signout">Sign out</a></p>"#
        )),
        None => page(&format!(
            r#"<h1>Welcome</h1>
<p>Click the button below to sign in.</p>
<p><a href="{prefix}/signin">Sign in</a></p>"#
        )),
    }
}

pub(crate) async fn protected(_token: AuthToken) -> Html<String> {
    tracing::trace!("Serving protected page");
    page(&format!(
        r#"<h1>Protected</h1>
<p>Only browsers holding an auth token see this page.</p>
<p><a href="{}/signout">Sign out</a></p>"#,
        PKCE_ROUTE_PREFIX.as_str()
    ))
}
