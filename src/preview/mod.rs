//! Preview — chat-bubble mockup of the generated post.
//!
//! DESIGN
//! ======
//! The bubble shows exactly one of three views, picked by
//! `(is_loading, content)` in that priority order. Content goes through
//! [`format::format_html`], the only markup injected with `inner_html`;
//! every other value is escaped by the view renderer.
//!
//! Copy happens in the browser. The button carries the raw source in a
//! data attribute and writes it with `navigator.clipboard`, then shows
//! the confirmation for [`COPY_CONFIRMATION`].

pub mod format;

use std::time::Duration;

use leptos::prelude::*;

use self::format::format_html;

pub const PLACEHOLDER: &str = "Your generated post will appear here...";

/// How long the copy confirmation stays on.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

const SKELETON_WIDTHS: [&str; 4] = ["75%", "100%", "83%", "50%"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewView<'a> {
    Loading,
    Content(&'a str),
    Empty,
}

impl<'a> PreviewView<'a> {
    #[must_use]
    pub fn select(is_loading: bool, content: &'a str) -> Self {
        if is_loading {
            Self::Loading
        } else if !content.is_empty() {
            Self::Content(content)
        } else {
            Self::Empty
        }
    }
}

/// Click handler for the copy button. A repeated copy restarts the timer.
#[must_use]
pub fn copy_handler() -> String {
    format!(
        "var b=this;navigator.clipboard.writeText(b.dataset.source).then(function(){{\
         b.classList.add('copied');b.textContent='Copied';clearTimeout(b.copyTimer);\
         b.copyTimer=setTimeout(function(){{b.classList.remove('copied');b.textContent='Copy'}},{})}})",
        COPY_CONFIRMATION.as_millis()
    )
}

/// Phone mockup: channel header, message bubble, copy control.
///
/// The copy control only appears when there is content to copy.
#[component]
pub fn PreviewBubble(is_loading: bool, #[prop(into)] content: String) -> impl IntoView {
    let shown = PreviewView::select(is_loading, &content);
    let body = match shown {
        PreviewView::Loading => view! {
            <div class="skeleton">
                {SKELETON_WIDTHS
                    .iter()
                    .map(|width| view! { <div class="skeleton-line" style=format!("width:{width}")></div> })
                    .collect_view()}
            </div>
        }
        .into_any(),
        PreviewView::Content(text) => view! { <div class="post" inner_html=format_html(text)></div> }.into_any(),
        PreviewView::Empty => view! { <div class="placeholder">{PLACEHOLDER}</div> }.into_any(),
    };
    let copy = matches!(shown, PreviewView::Content(_)).then(|| view! { <CopyButton source=content.clone()/> });

    view! {
        <div class="phone">
            <div class="phone-header">
                <div class="avatar">"TG"</div>
                <div>
                    <h3>"Growth Channel"</h3>
                    <p>"12.5K subscribers"</p>
                </div>
            </div>
            <div class="messages">
                <div class="bubble">
                    {body}
                    <div class="timestamp">"Just now"</div>
                </div>
                {copy}
            </div>
            <div class="phone-footer">"Broadcast"</div>
        </div>
    }
}

/// Copies the raw source text, markers intact.
#[component]
fn CopyButton(source: String) -> impl IntoView {
    view! {
        <button type="button" class="copy" title="Copy to clipboard" data-source=source onclick=copy_handler()>
            "Copy"
        </button>
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
