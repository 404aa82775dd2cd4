use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::constants::{ID_APP_SHELL, ID_APP_STYLES, ID_BREADCRUMB, ID_PAGE_CONTENT};
use crate::dom_utils::{append, el};

/// Build the fixed shell: sidebar, header with breadcrumb, content area.
/// Does nothing when the shell already exists.
pub fn create_base_ui(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ID_APP_SHELL).is_some() {
        return Ok(());
    }
    inject_styles(document)?;

    let shell = el(document, "div", "app-shell")?;
    shell.set_id(ID_APP_SHELL);
    append(&shell, &crate::components::sidebar::create(document)?)?;

    let main = el(document, "main", "app-main")?;
    let header = el(document, "header", "app-header")?;
    let breadcrumb = el(document, "nav", "breadcrumb")?;
    breadcrumb.set_id(ID_BREADCRUMB);
    breadcrumb.set_attribute("aria-label", "breadcrumb")?;
    header.append_child(&breadcrumb)?;
    main.append_child(&header)?;

    let content = el(document, "div", "page-content")?;
    content.set_id(ID_PAGE_CONTENT);
    main.append_child(&content)?;
    shell.append_child(&main)?;

    let body = document.body().ok_or(JsValue::from_str("No body found"))?;
    body.append_child(&shell)?;
    Ok(())
}

fn inject_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ID_APP_STYLES).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(ID_APP_STYLES);
    style.set_text_content(Some(APP_CSS));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document.body().ok_or(JsValue::from_str("No body found"))?.append_child(&style)?,
    };
    Ok(())
}

const APP_CSS: &str = "
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;color:#111827;background:#f9fafb}
a{color:inherit}
.hidden{display:none!important}
.app-shell{display:flex;min-height:100vh}
.sidebar{width:240px;flex-shrink:0;display:flex;flex-direction:column;gap:16px;padding:16px;background:#fff;border-right:1px solid #e5e7eb}
.sidebar-brand{display:flex;align-items:center;gap:10px;text-decoration:none}
.brand-logo{display:grid;place-items:center;width:32px;height:32px;border-radius:8px;background:#111827;color:#fff;font-weight:700}
.brand-text{display:flex;flex-direction:column;line-height:1.2}
.brand-text small{color:#6b7280}
.sidebar-secondary{margin-top:auto}
.nav-list{list-style:none;margin:0;padding:0;display:flex;flex-direction:column;gap:2px}
.nav-item{display:block;padding:6px 10px;border-radius:6px;text-decoration:none;font-size:14px}
.nav-item:hover{background:#f3f4f6}
.nav-item.active{background:#f3f4f6;font-weight:600}
.app-main{flex:1;display:flex;flex-direction:column;min-width:0}
.app-header{display:flex;align-items:center;height:56px;padding:0 24px;border-bottom:1px solid #e5e7eb;background:#fff}
.breadcrumb-list{display:flex;align-items:center;gap:8px;list-style:none;margin:0;padding:0;font-size:14px;color:#6b7280}
.breadcrumb-link{text-decoration:none}
.breadcrumb-link:hover{color:#111827}
.breadcrumb-page{color:#111827}
.page-content{flex:1;padding:24px;display:flex;flex-direction:column;gap:16px;min-height:0}
.page-header{display:flex;align-items:flex-start;justify-content:space-between;gap:16px}
.page-title{margin:0 0 4px;font-size:22px}
.page-subtitle{margin:0;color:#6b7280;font-size:14px}
.home-hero{margin:auto;text-align:center}
.card{background:#fff;border:1px solid #e5e7eb;border-radius:10px;padding:16px}
.card-title{margin:0 0 12px;font-size:16px}
.detail-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(320px,1fr));gap:16px}
.field-row{display:flex;align-items:center;justify-content:space-between;gap:12px;padding:6px 0;font-size:14px}
.field-label{color:#6b7280}
.separator{border:none;border-top:1px solid #e5e7eb;margin:8px 0}
.progress-wrap{display:flex;align-items:center;gap:8px;flex:1;justify-content:flex-end}
.progress{width:160px;height:8px;border-radius:4px;background:#e5e7eb;overflow:hidden}
.progress-bar{height:100%;background:#2563eb;transition:width .3s}
.action-row{display:flex;align-items:center;gap:8px;flex-wrap:wrap}
.document-list{list-style:none;margin:0;padding:0;font-size:14px}
.document-item{padding:6px 0;border-bottom:1px solid #f3f4f6}
.btn{display:inline-flex;align-items:center;gap:6px;padding:7px 14px;border-radius:6px;border:1px solid #111827;background:#111827;color:#fff;font-size:14px;cursor:pointer;text-decoration:none}
.btn:disabled{opacity:.5;cursor:not-allowed}
.btn-outline{background:#fff;color:#111827;border-color:#d1d5db}
.btn-ghost{background:transparent;color:#111827;border-color:transparent;padding:4px 8px}
.btn-ghost:hover{background:#f3f4f6}
.select,.input{padding:7px 10px;border:1px solid #d1d5db;border-radius:6px;font-size:14px;background:#fff}
.input{flex:1;min-width:0}
.badge{display:inline-block;padding:2px 8px;border-radius:9999px;font-size:12px;font-weight:500}
.badge-green{background:#dcfce7;color:#166534}
.badge-blue{background:#dbeafe;color:#1e40af}
.badge-yellow{background:#fef9c3;color:#854d0e}
.badge-red{background:#fee2e2;color:#991b1b}
.badge-gray{background:#f3f4f6;color:#1f2937}
.data-table{width:100%;border-collapse:collapse;font-size:14px}
.data-table th{text-align:left;color:#6b7280;font-weight:500;padding:8px;border-bottom:1px solid #e5e7eb}
.data-table td{padding:8px;border-bottom:1px solid #f3f4f6;vertical-align:middle}
.cell-strong{font-weight:500}
.cell-muted{color:#4b5563}
.cell-actions{white-space:nowrap}
.empty-state,.loading-indicator{padding:24px;text-align:center;color:#6b7280}
.playground{display:flex;flex-direction:column;flex:1;min-height:0;gap:12px}
.chat-messages{flex:1;overflow-y:auto;display:flex;flex-direction:column;gap:12px;padding:8px}
.chat-row{display:flex;align-items:flex-start;gap:8px;max-width:75%}
.chat-row.user{align-self:flex-end;flex-direction:row-reverse}
.chat-row.assistant{align-self:flex-start}
.chat-avatar{display:grid;place-items:center;width:32px;height:32px;border-radius:50%;background:#e5e7eb;font-size:13px;flex-shrink:0}
.chat-bubble{padding:8px 14px;border-radius:10px;font-size:14px;line-height:1.5}
.chat-row.user .chat-bubble{background:#3b82f6;color:#fff}
.chat-row.assistant .chat-bubble{background:#e5e7eb;color:#1f2937}
.preserve-whitespace{white-space:pre-wrap;word-break:break-word}
.chat-typing{color:#6b7280;font-size:13px;padding:0 8px}
.chat-composer{display:flex;gap:8px;padding-top:12px;border-top:1px solid #e5e7eb}
";
