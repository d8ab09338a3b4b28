//! Block list dispatch.

use tracing::warn;

use super::blocks::render_block;
use super::html::html_escape;
use super::{Diagnostic, RenderContext, Rendered};
use crate::content::block_list::{BlockList, Entry};

/// Walk the key order and emit each block in place.
///
/// Rejected entries produce a diagnostic and no markup; their siblings are
/// unaffected.
pub(crate) fn render_blocks(ctx: &RenderContext<'_>, list: &BlockList, out: &mut Rendered) {
    for (key, entry) in list.iter() {
        match entry {
            Some(Entry::Ready(block)) => {
                let tag = block.tag();
                out.html.push_str(&format!(
                    "<div class=\"block block--{}\" data-block-key=\"{}\">\n",
                    tag.css_name(),
                    html_escape(key.as_str())
                ));
                out.html.push_str(&render_block(&block.kind, ctx));
                out.html.push_str("</div>\n");
            }
            Some(Entry::Rejected(rejection)) => {
                warn!(
                    key = %key,
                    tag = rejection.tag.as_deref().unwrap_or("<none>"),
                    reason = %rejection.reason,
                    "skipping block that cannot be rendered"
                );
                out.diagnostics.push(Diagnostic {
                    key: key.to_string(),
                    tag: rejection.tag.clone(),
                    message: rejection.reason.clone(),
                });
            }
            None => {
                warn!(key = %key, "block key has no entry");
                out.diagnostics.push(Diagnostic {
                    key: key.to_string(),
                    tag: None,
                    message: "block key has no entry".to_string(),
                });
            }
        }
    }
}
