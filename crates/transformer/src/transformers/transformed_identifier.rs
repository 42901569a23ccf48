use html::Dom;

use crate::amphtml::DomHandle;

pub(super) fn apply(dom: &mut Dom) {
    let Ok(handle) = DomHandle::new(dom) else {
        return;
    };
    if let Some(html) = dom.element_mut(handle.html) {
        html.set_attr("transformed", "google");
    }
}
