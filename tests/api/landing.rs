use crate::helpers::TestApp;

#[tokio::test]
async fn renders_the_form() {
    let app = TestApp::spawn().await;

    let res = app.landing().await.expect("Failed to execute request");
    assert!(res.status().is_success());
    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/html"));

    let html = res.text().await.expect("Failed to read body");
    assert!(html.contains("<form id=\"waitlist-form\" method=\"post\" action=\"/waitlist\""));
    assert!(html.contains("name=\"email\" value=\"\""));
    assert!(html.contains("Join the Waitlist"));
}

#[tokio::test]
async fn carries_search_and_social_metadata() {
    let app = TestApp::spawn().await;

    let html = app.landing().await.unwrap().text().await.unwrap();

    assert!(html.contains("<meta property=\"og:image:width\" content=\"1200\">"));
    assert!(html.contains("<meta property=\"og:image:height\" content=\"630\">"));
    assert!(html.contains("<meta name=\"twitter:card\" content=\"summary_large_image\">"));
    assert!(html.contains("max-image-preview:large"));
    assert!(html.contains("<meta property=\"og:locale\" content=\"en_US\">"));
}

#[tokio::test]
async fn embeds_the_entrance_keyframes() {
    let app = TestApp::spawn().await;

    let html = app.landing().await.unwrap().text().await.unwrap();

    assert!(html.contains("@keyframes landing-logo {"));
    assert!(html.contains("@keyframes landing-command-accent-loop-0 {"));
    assert!(html.contains("#waitlist-form { opacity: 0.000; visibility: hidden;"));
}

#[tokio::test]
async fn submit_button_locks_while_the_form_posts() {
    let app = TestApp::spawn().await;

    let html = app.landing().await.unwrap().text().await.unwrap();

    let form = html
        .split("<form id=\"waitlist-form\"")
        .nth(1)
        .and_then(|rest| rest.split('>').next())
        .expect("Missing waitlist form");
    assert!(form.contains("onsubmit=\""));
    assert!(form.contains("if (b.disabled) { return false; }"));
    assert!(form.contains("b.disabled = true;"));
    assert!(form.contains("b.setAttribute('aria-busy', 'true');"));
    assert!(form.contains("b.textContent = 'Joining the waitlist...';"));
}
