// Text flattening for loosely structured SA markup

use roxmltree::Node;

/// Concatenate all character data under `node` in document order.
///
/// SA documents wrap titles and link text in arbitrary inline markup
/// (`<font>`, `<b>`, `<i>`, ...), so the element's own text, every child's
/// flattened text, and every child's tail are joined without separators.
/// Comments and processing instructions contribute nothing.
pub fn flatten(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    flatten_into(node, &mut out);
    out
}

fn flatten_into(node: Node<'_, '_>, out: &mut String) {
    if node.is_text() {
        if let Some(text) = node.text() {
            out.push_str(text);
        }
        return;
    }

    for child in node.children() {
        if child.is_text() || child.is_element() {
            flatten_into(child, out);
        }
    }
}
