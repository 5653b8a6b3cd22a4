//! HTML page: the post configuration form beside the live preview.
//!
//! The page is rendered server-side from composer state. Form posts
//! redirect back to `/`, and while a generation is pending the page
//! refreshes itself every second.

use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use leptos::prelude::*;
use serde::Deserialize;
use tracing::debug;

use super::api::StateSnapshot;
use crate::preview::PreviewBubble;
use crate::services::post::{Language, PostParams, Tone};
use crate::services::session;
use crate::state::AppState;

const STYLE: &str = r"
body{margin:0;font-family:system-ui,sans-serif;background:#f9fafb;color:#111827}
header{background:#fff;border-bottom:1px solid #e5e7eb;padding:0 2rem;height:4rem;display:flex;align-items:center;justify-content:space-between}
main{max-width:80rem;margin:0 auto;padding:2rem;display:grid;grid-template-columns:repeat(auto-fit,minmax(22rem,1fr));gap:3rem;align-items:start}
section.form{background:#fff;border:1px solid #f3f4f6;border-radius:1rem;padding:2rem}
label{display:block;font-weight:600;font-size:.875rem;margin:1rem 0 .25rem}
textarea,input,select{width:100%;box-sizing:border-box;padding:.75rem 1rem;border:1px solid #e5e7eb;border-radius:.75rem;background:#f9fafb;font:inherit}
button.submit{width:100%;margin-top:1.5rem;padding:1rem;border:0;border-radius:.75rem;color:#fff;font-size:1.1rem;font-weight:600;background:#3b82f6}
button.submit:disabled{background:#d1d5db}
.error{margin-top:1rem;background:#fef2f2;border:1px solid #fecaca;color:#dc2626;padding:.75rem 1rem;border-radius:.5rem;font-size:.875rem}
.phone{max-width:28rem;margin:0 auto}
.phone-header{background:#517da2;color:#fff;padding:.75rem;border-radius:.75rem .75rem 0 0;display:flex;align-items:center;gap:.75rem}
.phone-header h3,.phone-header p{margin:0;font-size:.875rem}
.avatar{width:2rem;height:2rem;border-radius:50%;background:#fff;color:#517da2;display:flex;align-items:center;justify-content:center;font-weight:700}
.messages{background:#8e9caf;min-height:25rem;padding:1rem;position:relative}
.bubble{background:#fff;border-radius:0 .75rem .75rem .75rem;padding:.75rem;max-width:90%}
.post{font-size:15px;line-height:1.6;word-break:break-word}
.mono{color:#4e7d96;background:#eef6fa;padding:0 .25rem;border-radius:.25rem;font-family:monospace}
.placeholder{color:#9ca3af;font-style:italic;font-size:.875rem}
.skeleton-line{height:1rem;background:#e5e7eb;border-radius:.25rem;margin:.5rem 0}
.timestamp{text-align:right;font-size:11px;color:#9ca3af}
.copy{position:absolute;right:1rem;bottom:1rem;padding:.75rem 1rem;border:0;border-radius:9999px;background:#fff;color:#517da2}
.copy.copied{background:#22c55e;color:#fff}
.phone-footer{background:#fff;padding:.75rem;border-top:1px solid #e5e7eb;border-radius:0 0 .75rem .75rem;text-align:center;color:#9ca3af;font-size:.75rem;letter-spacing:.2em;text-transform:uppercase}
.tip{margin-top:1.5rem;text-align:center;font-size:.875rem;color:#6b7280}
";

/// Urlencoded body of the post configuration form.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub topic: String,
    pub tone: Tone,
    pub language: Language,
    #[serde(default)]
    pub cta: String,
}

/// `GET /` — render the page from the current state.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(StateSnapshot::capture(&state)))
}

/// `POST /generate` — store the form fields and start a generation.
pub async fn generate(State(state): State<AppState>, Form(form): Form<PostForm>) -> Redirect {
    {
        let mut composer = state.composer();
        composer.set_topic(form.topic);
        composer.set_tone(form.tone);
        composer.set_language(form.language);
        composer.set_cta(form.cta);
    }
    if let Err(skipped) = session::submit(&state) {
        debug!(reason = %skipped, "page: generate skipped");
    }
    Redirect::to("/")
}

/// `POST /reset` — cancel any pending generation and clear the preview.
pub async fn reset(State(state): State<AppState>) -> Redirect {
    session::reset(&state);
    Redirect::to("/")
}

// =============================================================================
// RENDERING
// =============================================================================

#[must_use]
pub fn render_page(snap: StateSnapshot) -> String {
    let owner = Owner::new();
    owner.with(|| view! { <Page snap=snap/> }.to_html())
}

#[component]
fn Page(snap: StateSnapshot) -> impl IntoView {
    let StateSnapshot { params, loading, error, content, .. } = snap;
    let can_reset = loading || !content.is_empty() || error.is_some();
    let tip = (!content.is_empty()).then(|| {
        view! { <p class="tip">"Tip: Click the copy button inside the preview to grab the Markdown."</p> }
    });

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width,initial-scale=1"/>
                {loading.then(|| view! { <meta http-equiv="refresh" content="1"/> })}
                <title>"TeleGen"</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <header>
                    <h1>"TeleGen"</h1>
                    <span>"Built for Indian Creators 🇮🇳"</span>
                </header>
                <main>
                    <PostFormView params=params error=error loading=loading can_reset=can_reset/>
                    <section class="preview">
                        <PreviewBubble is_loading=loading content=content/>
                        {tip}
                    </section>
                </main>
            </body>
        </html>
    }
}

/// The configuration form. The submit button is disabled while pending.
#[component]
fn PostFormView(params: PostParams, error: Option<String>, loading: bool, can_reset: bool) -> impl IntoView {
    let PostParams { topic, tone, language, cta } = params;

    view! {
        <section class="form">
            <h2>"Post Configuration"</h2>
            <p>"Define your content strategy and let the model handle the creative work."</p>
            <form method="post" action="/generate">
                <label for="topic">"Topic / Hook *"</label>
                <textarea
                    id="topic"
                    name="topic"
                    rows="3"
                    required=true
                    placeholder="e.g. Nifty hitting all time high, Flipkart Big Billion Days Sale, Crypto crash..."
                >
                    {topic}
                </textarea>

                <label for="tone">"Tone"</label>
                <select id="tone" name="tone">
                    {Tone::ALL
                        .into_iter()
                        .map(|t| view! { <SelectOption value=t.as_str() selected={t == tone}/> })
                        .collect_view()}
                </select>

                <label for="language">"Language"</label>
                <select id="language" name="language">
                    {Language::ALL
                        .into_iter()
                        .map(|l| view! { <SelectOption value=l.as_str() selected={l == language}/> })
                        .collect_view()}
                </select>

                <label for="cta">"Call to Action (Optional)"</label>
                <input
                    type="text"
                    id="cta"
                    name="cta"
                    placeholder="e.g. Join premium channel, Loot fast, Link in bio..."
                    value=cta
                />

                {error.map(|message| view! { <div class="error" role="alert">{message}</div> })}

                <button type="submit" class="submit" disabled=loading>
                    {if loading { "Writing..." } else { "Generate Post" }}
                </button>
            </form>
            {can_reset.then(|| {
                view! {
                    <form method="post" action="/reset">
                        <button type="submit">"Start over"</button>
                    </form>
                }
            })}
        </section>
    }
}

#[component]
fn SelectOption(value: &'static str, selected: bool) -> impl IntoView {
    view! { <option value=value selected=selected>{value}</option> }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
