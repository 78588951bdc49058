use axum::{body::Body, response::Response};
use scraper::Html;

/// Read the whole response body and parse it as an HTML document.
pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");
    let text = String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8");

    Html::parse_document(&text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(html.errors.is_empty(), "HTML has parse errors: {:?}", html.errors);
}
