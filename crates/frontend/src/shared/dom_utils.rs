use leptos::ev::Event;
use wasm_bindgen::JsCast;

/// Value of the `<input>` element an event fired on.
pub fn event_target_value(ev: &Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input: web_sys::HtmlInputElement| input.value())
        .unwrap_or_default()
}

/// First file of the `<input type="file">` an event fired on, clearing the
/// input so re-selecting the same file fires again.
pub fn event_target_file(ev: &Event) -> Option<web_sys::File> {
    let input: web_sys::HtmlInputElement = ev.target()?.dyn_into().ok()?;
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

/// Format a byte count the way the upload zone shows it.
pub fn format_size_mb(size: u64) -> String {
    format!("{:.2} MB", size as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size_mb(1024 * 1024), "1.00 MB");
        assert_eq!(format_size_mb(1536 * 1024), "1.50 MB");
        assert_eq!(format_size_mb(0), "0.00 MB");
    }
}
