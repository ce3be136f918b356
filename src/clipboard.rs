//! Clipboard
//!
//! Async text copy through the browser Clipboard API.

use wasm_bindgen_futures::JsFuture;

/// How long a "Copied" label stays up
pub const COPIED_RESET_MS: u32 = 2000;

/// Banner text for a rejected write
pub fn failure_message(detail: Option<String>) -> String {
    match detail.filter(|d| !d.trim().is_empty()) {
        Some(detail) => format!("Could not copy to the clipboard: {}", detail),
        None => "Could not copy to the clipboard".to_string(),
    }
}

/// Write `text` to the clipboard, resolving once the browser accepted it
pub async fn copy_text(text: &str) -> Result<(), String> {
    let Some(win) = web_sys::window() else {
        return Err(failure_message(None));
    };
    let promise = win.navigator().clipboard().write_text(text);
    match JsFuture::from(promise).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let detail = e.as_string().unwrap_or_else(|| format!("{:?}", e));
            log::warn!("[CLIPBOARD] Write rejected: {}", detail);
            Err(failure_message(Some(detail)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        assert_eq!(failure_message(None), "Could not copy to the clipboard");
        assert_eq!(failure_message(Some("  ".to_string())), "Could not copy to the clipboard");
        assert_eq!(
            failure_message(Some("NotAllowedError".to_string())),
            "Could not copy to the clipboard: NotAllowedError"
        );
    }
}
