use web_sys as web;

/// Hide the host page's loading placeholder once the globe is ready.
#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("globe-loading") {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:none");
    }
}
