//! Mount point: remembers the last rendered virtual tree
//!
//! The patcher is stateless. Callers that re-render into the same parent
//! keep the previous virtual tree around themselves; `Mount` is that
//! bookkeeping in one place.

use tracing::{debug, warn};

use crate::algo::{PatchConfig, PatchStats, patch_with_config};
use crate::error::{PatchError, PatchResult};
use crate::host::Host;
use crate::materialize::materialize;
use crate::node::VNode;

/// A live parent plus the virtual tree currently rendered as its first child.
///
/// A render that fails partway leaves the live child in an unknown state.
/// The mount is then marked stale and the next render rebuilds the child
/// from scratch instead of patching it.
#[derive(Debug)]
pub struct Mount<N> {
    parent: N,
    current: Option<VNode>,
    stale: bool,
    config: PatchConfig,
}

impl<N: Clone> Mount<N> {
    /// Mount point with default patch configuration.
    pub fn new(parent: N) -> Self {
        Self::with_config(parent, PatchConfig::default())
    }

    /// Mount point patching with `config`.
    pub fn with_config(parent: N, config: PatchConfig) -> Self {
        Self {
            parent,
            current: None,
            stale: false,
            config,
        }
    }

    /// Live parent node
    pub fn parent(&self) -> &N {
        &self.parent
    }

    /// Virtual tree from the last successful render
    pub fn current(&self) -> Option<&VNode> {
        self.current.as_ref()
    }

    /// Whether a virtual tree is currently rendered
    pub fn is_mounted(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the last render failed and the live child no longer matches
    /// any known virtual tree
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Patch the live tree from the remembered tree to `vnode`.
    ///
    /// On failure the mount becomes stale: the remembered tree is dropped and
    /// the next render replaces the live child wholesale.
    pub fn render<H>(&mut self, host: &mut H, vnode: VNode) -> PatchResult<PatchStats, H::Error>
    where
        H: Host<Node = N>,
    {
        let result = if self.stale {
            self.rebuild(host, &vnode)
        } else {
            patch_with_config(
                host,
                &self.parent,
                self.current.as_ref(),
                Some(&vnode),
                0,
                self.config,
            )
        };

        match result {
            Ok(stats) => {
                self.current = Some(vnode);
                self.stale = false;
                Ok(stats)
            }
            Err(err) => {
                warn!("render failed, mount marked stale");
                self.current = None;
                self.stale = true;
                Err(err)
            }
        }
    }

    /// Remove the rendered child and forget the remembered tree.
    pub fn unmount<H>(&mut self, host: &mut H) -> PatchResult<PatchStats, H::Error>
    where
        H: Host<Node = N>,
    {
        if self.stale {
            return self.remove_stale(host);
        }
        let Some(old) = self.current.take() else {
            return Ok(PatchStats::default());
        };
        debug!("unmount");
        let result = patch_with_config(host, &self.parent, Some(&old), None, 0, self.config);
        if result.is_err() {
            self.current = Some(old);
        }
        result
    }

    /// Swap whatever occupies the first slot for a fresh build of `vnode`.
    fn rebuild<H>(&self, host: &mut H, vnode: &VNode) -> PatchResult<PatchStats, H::Error>
    where
        H: Host<Node = N>,
    {
        debug!("rebuilding stale mount");
        let live = materialize(host, vnode).map_err(PatchError::Host)?;
        match host.child_at(&self.parent, 0) {
            Some(old) => {
                host.replace_child(&self.parent, &old, &live).map_err(PatchError::Host)?;
                Ok(PatchStats { nodes_replaced: 1, ..PatchStats::default() })
            }
            None => {
                host.append_child(&self.parent, &live).map_err(PatchError::Host)?;
                Ok(PatchStats { nodes_created: 1, ..PatchStats::default() })
            }
        }
    }

    fn remove_stale<H>(&mut self, host: &mut H) -> PatchResult<PatchStats, H::Error>
    where
        H: Host<Node = N>,
    {
        let mut stats = PatchStats::default();
        if let Some(old) = host.child_at(&self.parent, 0) {
            host.remove_child(&self.parent, &old).map_err(PatchError::Host)?;
            stats.nodes_removed = 1;
        }
        self.stale = false;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    fn counter(n: i32) -> VNode {
        h!("div", { "class" => "counter" }, h!("span", {}, n))
    }

    #[test]
    fn test_render_remembers_tree() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);
        assert!(!mount.is_mounted());

        let stats = mount.render(&mut host, counter(0)).unwrap();
        assert_eq!(stats.nodes_created, 1);
        assert!(mount.is_mounted());

        let stats = mount.render(&mut host, counter(1)).unwrap();
        assert_eq!(stats.nodes_created, 0);
        assert_eq!(stats.nodes_replaced, 1);
        assert_eq!(
            host.to_html(*mount.parent()),
            r#"<body><div class="counter"><span>1</span></div></body>"#
        );
    }

    #[test]
    fn test_rerender_same_tree_is_quiet() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);
        mount.render(&mut host, counter(3)).unwrap();
        host.clear_mutations();

        let stats = mount.render(&mut host, counter(3)).unwrap();
        assert!(!stats.has_changes());
        assert!(host.mutations().is_empty());
    }

    #[test]
    fn test_unmount() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);
        mount.render(&mut host, counter(1)).unwrap();

        let stats = mount.unmount(&mut host).unwrap();
        assert_eq!(stats.nodes_removed, 1);
        assert!(mount.current().is_none());
        assert!(host.children(body).is_empty());

        // Second unmount is a no-op
        assert!(!mount.unmount(&mut host).unwrap().has_changes());
    }

    #[test]
    fn test_failed_render_marks_stale() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);
        mount.render(&mut host, counter(1)).unwrap();

        assert!(mount.render(&mut host, h!("")).is_err());
        assert!(mount.is_stale());
        assert!(mount.current().is_none());
    }

    #[test]
    fn test_render_after_partial_failure_rebuilds() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);
        mount.render(&mut host, h!("ul", {}, h!("li", {}, "a"))).unwrap();

        // "b" lands before the empty tag fails
        let failing = h!("ul", {}, h!("li", {}, "a"), h!("li", {}, "b"), h!(""));
        assert!(mount.render(&mut host, failing).is_err());
        assert_eq!(host.to_html(body), "<body><ul><li>a</li><li>b</li></ul></body>");

        let stats = mount.render(&mut host, h!("ul", {}, h!("li", {}, "a"), h!("li", {}, "c"))).unwrap();
        assert_eq!(stats.nodes_replaced, 1);
        assert!(!mount.is_stale());
        assert_eq!(host.to_html(body), "<body><ul><li>a</li><li>c</li></ul></body>");

        // Back to ordinary patching
        host.clear_mutations();
        mount.render(&mut host, h!("ul", {}, h!("li", {}, "a"), h!("li", {}, "c"))).unwrap();
        assert!(host.mutations().is_empty());
    }

    #[test]
    fn test_failed_first_render_then_recover() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);

        assert!(mount.render(&mut host, h!("div", {}, h!(""))).is_err());
        assert!(host.children(body).is_empty());

        let stats = mount.render(&mut host, counter(2)).unwrap();
        assert_eq!(stats.nodes_created, 1);
        assert_eq!(
            host.to_html(body),
            r#"<body><div class="counter"><span>2</span></div></body>"#
        );
    }

    #[test]
    fn test_unmount_stale_removes_live_child() {
        let mut host = MemoryHost::new();
        let body = host.create_element("body").unwrap();
        let mut mount = Mount::new(body);
        mount.render(&mut host, counter(1)).unwrap();
        assert!(mount.render(&mut host, h!("")).is_err());

        let stats = mount.unmount(&mut host).unwrap();
        assert_eq!(stats.nodes_removed, 1);
        assert!(!mount.is_stale());
        assert!(host.children(body).is_empty());
    }
}
