//! Toast notifications.
//! Creates a `#toast-root` container once per page and prepends toast divs
//! that remove themselves after a few seconds.

use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};

const TOAST_ROOT_ID: &str = "toast-root";
const TOAST_STYLES_ID: &str = "toast-styles";
const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

pub fn show(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    ensure_styles(&document);
    let Some(root) = ensure_root(&document) else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        return;
    };
    toast.set_class_name(kind.class());
    let _ = toast.set_attribute("role", if kind == ToastKind::Error { "alert" } else { "status" });
    toast.set_text_content(Some(message));

    // Newest on top.
    let _ = root.prepend_with_node_1(&toast);

    Timeout::new(TOAST_LIFETIME_MS, move || toast.remove()).forget();
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id(TOAST_ROOT_ID) {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id(TOAST_ROOT_ID);
    root.set_class_name("toast-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

fn ensure_styles(document: &Document) {
    if document.get_element_by_id(TOAST_STYLES_ID).is_some() {
        return;
    }

    let css = "
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999}
.toast{padding:10px 16px;border-radius:6px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards;max-width:360px}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.toast-info{background:#2563eb}
@keyframes toast-in{to{opacity:1}}
";

    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_id(TOAST_STYLES_ID);
    style.set_text_content(Some(css));
    if let Some(head) = document.head() {
        let _ = head.append_child(&style);
    } else if let Some(body) = document.body() {
        let _ = body.append_child(&style);
    }
}
