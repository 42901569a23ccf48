pub const BLOCK_TEMPLATE: &str = "<div class=box><amp-img layout=responsive width=320 height=256 src=/a.png></amp-img><a href=/next>next</a><p>hello &amp; bye</p></div>";

/// Builds an AMP-shaped document with `blocks` repetitions of [`BLOCK_TEMPLATE`] in the body.
pub fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks + 256);
    html.push_str("<!doctype html><html ⚡><head><meta charset=utf-8>");
    html.push_str("<script async src=https://cdn.ampproject.org/v0.js></script>");
    html.push_str("<title>bench</title></head><body>");
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html.push_str("</body></html>");
    html
}
