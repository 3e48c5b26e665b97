//! Landing, search hub and contact pages

use axum::{
    extract::{Form, OriginalUri, State},
    response::Html,
};

use super::layout::{page, search_form};
use crate::contact::{ContactForm, ContactPayload};
use crate::AppState;

/// GET /
pub async fn home_page() -> Html<String> {
    let body = r#"
<h1>Dude Perfect Fan Archive</h1>
<p>Every song, artist and video from the channel, cross-referenced.</p>
<ul>
  <li><a href="/videos">Browse videos</a></li>
  <li><a href="/videos/categories">Browse by category</a></li>
  <li><a href="/songs">Find a song</a></li>
  <li><a href="/artists">Find an artist</a></li>
</ul>
"#;
    Html(page("Home", body))
}

/// GET /search
pub async fn search_page() -> Html<String> {
    let body = format!(
        "<h1>Search</h1>\n<h2>Songs</h2>\n{}\n<h2>Artists</h2>\n{}\n<h2>Videos</h2>\n{}",
        search_form("/songs", "Song title", None),
        search_form("/artists", "Artist name", None),
        search_form("/videos", "Video title", None),
    );
    Html(page("Search", &body))
}

/// GET /contact
pub async fn contact_page() -> Html<String> {
    let body = r#"
<h1>Contact</h1>
<p>Spotted a missing song or a wrong credit? Let us know.</p>
<form method="post" action="/contact/submit">
  <p><label>Name<br><input type="text" name="name" required></label></p>
  <p><label>Email<br><input type="email" name="email" required></label></p>
  <p><label>Message<br><textarea name="message" rows="6" required></textarea></label></p>
  <input type="hidden" name="token" value="contact-form">
  <p style="display:none"><label>Website<input type="text" name="website" tabindex="-1" autocomplete="off"></label></p>
  <p><button type="submit">Send</button></p>
</form>
"#;
    Html(page("Contact", body))
}

/// POST /contact/submit
///
/// Always answers with the success page; delivery happens in the background.
pub async fn contact_submit(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Form(form): Form<ContactForm>,
) -> Html<String> {
    let page_url = format!("{}{}", state.base_url, uri);
    state
        .notifier
        .notify(ContactPayload::from_form(form, page_url));

    let body = r#"
<h1>Thanks!</h1>
<p>Your message has been sent.</p>
<p><a href="/">Back to the archive</a></p>
"#;
    Html(page("Message sent", body))
}
