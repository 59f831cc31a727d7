//! Device tree nodes from the `dt` crate as modalias sources.

use crate::{config::ALIASES_PATH, error::ModaliasError, node::DeviceNode, uevent::UeventEnv};
use dt::node::{DeviceTree, Node};
use log::warn;
use utils::error::Message;

/// Readable `compatible` entries of `node`; undecodable ones are logged and skipped.
fn compatibles(node: &Node) -> impl Iterator<Item = &str> {
    node.compatibles().filter_map(|compat| match compat {
        Ok(compat) => Some(compat),
        Err(err) => {
            warn!(
                "Skipping compatible entry of node '{}': {}.",
                node.full_name,
                Message(&err)
            );
            None
        }
    })
}

/// The `N` field is the node name without its unit address.
impl DeviceNode for Node {
    fn display_name(&self) -> &str {
        &self.node_name
    }

    fn device_type(&self) -> &str {
        Node::device_type(self).unwrap_or_default()
    }

    fn for_each_compatible(&self, f: &mut dyn FnMut(&str)) {
        compatibles(self).for_each(f)
    }
}

/// Add the `OF_*` variables describing `node` to `env`.
///
/// Adds `OF_NAME`, `OF_FULLNAME`, `OF_TYPE` when the node has a device type,
/// `OF_COMPATIBLE_<i>` per entry with `OF_COMPATIBLE_N` as the count, and
/// `OF_ALIAS_<i>` for every `/aliases` property naming the node's path.
pub fn device_uevent(
    tree: &DeviceTree,
    node: &Node,
    env: &mut UeventEnv,
) -> Result<(), ModaliasError> {
    let path = tree.get_full_path(node);
    env.add_var(format_args!("OF_NAME={}", node.node_name))?;
    env.add_var(format_args!("OF_FULLNAME={}", path))?;
    if let Some(ty) = Node::device_type(node) {
        env.add_var(format_args!("OF_TYPE={}", ty))?;
    }

    let mut seen = 0;
    for compat in compatibles(node) {
        env.add_var(format_args!("OF_COMPATIBLE_{}={}", seen, compat))?;
        seen += 1;
    }
    env.add_var(format_args!("OF_COMPATIBLE_N={}", seen))?;

    let Some(aliases) = tree.get_node(ALIASES_PATH) else {
        return Ok(());
    };
    let mut seen = 0;
    for prop in &aliases.props {
        if prop.value_as_str().is_ok_and(|target| target == &*path) {
            env.add_var(format_args!("OF_ALIAS_{}={}", seen, prop.name))?;
            seen += 1;
        }
    }
    Ok(())
}
