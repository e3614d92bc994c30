use jarsmith_api::JarManifest;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Maximum line length in bytes, excluding the line break
const MAX_LINE: usize = 72;

/// Render a manifest in jar format: CRLF line breaks, lines folded at 72
/// bytes with a leading space on continuations, and a trailing blank line.
pub fn render(manifest: &JarManifest) -> String {
    let mut out = String::new();
    for (name, value) in manifest.attributes() {
        push_folded(&mut out, &format!("{}: {}", name, value));
    }
    out.push_str("\r\n");
    out
}

fn push_folded(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE;
    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str("\r\n ");
        rest = &rest[cut..];
        // continuation lines spend one byte on the leading space
        limit = MAX_LINE - 1;
    }
}
