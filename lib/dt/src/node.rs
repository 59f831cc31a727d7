use crate::prop::{Property, StrListIter};
use alloc::{boxed::Box, string::String, vec, vec::Vec};

pub struct DeviceTree {
    pub root_id: usize,
    pub container: Vec<Node>,
}

pub struct Node {
    pub node_id: usize,
    pub parent_id: usize,
    pub full_name: Box<str>,
    pub node_name: Box<str>,
    pub unit_addr: Box<str>,
    pub children: Vec<usize>,
    pub props: Vec<Property>,
}

impl Node {
    fn new(node_id: usize, parent_id: usize, full_name: &str) -> Node {
        let (node_name, unit_addr) = full_name.split_once('@').unwrap_or((full_name, ""));
        Node {
            node_id,
            parent_id,
            full_name: full_name.into(),
            node_name: node_name.into(),
            unit_addr: unit_addr.into(),
            children: vec![],
            props: vec![],
        }
    }

    pub fn property(&self, name: impl AsRef<str>) -> Option<&Property> {
        let name = name.as_ref();
        self.props.iter().find(|prop| prop.name.as_ref().eq(name))
    }

    /// Value of the `device_type` property, if present and readable.
    pub fn device_type(&self) -> Option<&str> {
        self.property("device_type")?.value_as_str().ok()
    }

    /// Entries of the `compatible` property in declaration order.
    ///
    /// A node without the property yields nothing.
    pub fn compatibles(&self) -> StrListIter<'_> {
        match self.property("compatible") {
            Some(prop) => prop.strings(),
            None => StrListIter::from_bytes(&[]),
        }
    }
}

impl DeviceTree {
    /// Create a tree holding only the root node.
    pub fn new() -> DeviceTree {
        DeviceTree {
            root_id: 0,
            container: vec![Node::new(0, 0, "")],
        }
    }

    pub fn root(&self) -> &Node {
        &self.container[self.root_id]
    }

    /// Append a child named `full_name` (`name@unit-address`) under `parent_id`.
    ///
    /// Returns the id of the new node. Panics if `parent_id` is not in the tree.
    pub fn add_node(&mut self, parent_id: usize, full_name: impl AsRef<str>) -> usize {
        let node_id = self.container.len();
        self.container
            .push(Node::new(node_id, parent_id, full_name.as_ref()));
        self.container[parent_id].children.push(node_id);
        node_id
    }

    /// Attach `prop` to a node, replacing any property of the same name.
    pub fn add_property(&mut self, node_id: usize, prop: Property) {
        let props = &mut self.container[node_id].props;
        match props.iter_mut().find(|p| p.name == prop.name) {
            Some(slot) => *slot = prop,
            None => props.push(prop),
        }
    }

    pub fn is_root(&self, node: &Node) -> bool {
        self.get_parent(node).node_id == node.node_id
    }
    fn full_path(&self, node: &Node) -> String {
        if self.is_root(node) {
            String::new()
        } else {
            self.full_path(self.get_parent(node)) + "/" + node.full_name.as_ref()
        }
    }
    /// Absolute path of `node`; the root is `/`.
    pub fn get_full_path(&self, node: &Node) -> Box<str> {
        let path = self.full_path(node);
        if path.is_empty() {
            return "/".into();
        }
        path.into_boxed_str()
    }
    pub fn get_parent(&self, node: &Node) -> &Node {
        &self.container[node.parent_id]
    }
    pub fn get_children<'b>(&'b self, node: &Node) -> impl Iterator<Item = &'b Node> {
        node.children.iter().map(|x| &self.container[*x])
    }
    pub fn get_property<'b>(&self, node: &'b Node, name: impl AsRef<str>) -> Option<&'b Property> {
        node.property(name)
    }
    pub fn get_node(&self, path: impl AsRef<str>) -> Option<&Node> {
        let mut node = self.root();
        for section in path.as_ref().split('/') {
            if section.trim().is_empty() {
                continue;
            }
            node = self
                .get_children(node)
                .find(|subnode| subnode.full_name.as_ref().eq(section))?;
        }
        Some(node)
    }
    /// Resolve every node matching `path`.
    ///
    /// A section matches a child by full name or by bare node name; `*` matches any child.
    pub fn get_nodes(&self, path: impl AsRef<str>) -> Vec<&Node> {
        let path: Vec<&str> = path.as_ref().split('/').collect();
        self.get_sub_nodes(self.root(), &path, 0)
    }
    fn get_sub_nodes<'b>(
        &'b self,
        node: &'b Node,
        path: &[&str],
        mut cursor: usize,
    ) -> Vec<&'b Node> {
        while cursor < path.len() && path[cursor].trim().is_empty() {
            cursor += 1;
        }
        if cursor >= path.len() {
            return vec![node];
        }
        let sec = path[cursor];
        self.get_children(node)
            .flat_map(|child| {
                if sec.eq("*")
                    || child.full_name.as_ref().eq(sec)
                    || child.node_name.as_ref().eq(sec)
                {
                    self.get_sub_nodes(child, path, cursor + 1)
                } else {
                    vec![]
                }
            })
            .collect()
    }
}

impl Default for DeviceTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeviceTree {
        let mut tree = DeviceTree::new();
        let soc = tree.add_node(tree.root_id, "soc");
        let uart0 = tree.add_node(soc, "uart@1000");
        tree.add_property(uart0, Property::from_str("device_type", "serial"));
        tree.add_property(
            uart0,
            Property::from_strlist("compatible", &["ns16550a", "ns16550"]),
        );
        tree.add_node(soc, "uart@2000");
        tree
    }

    #[test]
    fn unit_address_is_split() {
        let tree = sample();
        let node = tree.get_node("/soc/uart@1000").unwrap();
        assert_eq!(&*node.node_name, "uart");
        assert_eq!(&*node.unit_addr, "1000");
        assert_eq!(&*node.full_name, "uart@1000");
    }

    #[test]
    fn full_path() {
        let tree = sample();
        let node = tree.get_node("/soc/uart@1000").unwrap();
        assert_eq!(&*tree.get_full_path(node), "/soc/uart@1000");
        assert_eq!(&*tree.get_full_path(tree.root()), "/");
        assert!(tree.is_root(tree.root()));
        assert!(!tree.is_root(node));
    }

    #[test]
    fn missing_path() {
        let tree = sample();
        assert!(tree.get_node("/soc/uart@3000").is_none());
        assert!(tree.get_node("/").is_some());
    }

    #[test]
    fn wildcard_and_bare_names() {
        let tree = sample();
        assert_eq!(tree.get_nodes("/soc/uart").len(), 2);
        assert_eq!(tree.get_nodes("/*/*").len(), 2);
        assert_eq!(tree.get_nodes("/soc/uart@2000").len(), 1);
    }

    #[test]
    fn node_accessors() {
        let tree = sample();
        let uart0 = tree.get_node("/soc/uart@1000").unwrap();
        assert_eq!(uart0.device_type(), Some("serial"));
        assert!(tree.get_property(uart0, "compatible").is_some());
        assert!(tree.get_property(uart0, "reg").is_none());
        let compat: Vec<_> = uart0.compatibles().map(Result::unwrap).collect();
        assert_eq!(compat, vec!["ns16550a", "ns16550"]);

        let uart1 = tree.get_node("/soc/uart@2000").unwrap();
        assert_eq!(uart1.device_type(), None);
        assert_eq!(uart1.compatibles().count(), 0);
    }

    #[test]
    fn property_is_replaced() {
        let mut tree = sample();
        let id = tree.get_node("/soc/uart@2000").unwrap().node_id;
        tree.add_property(id, Property::from_str("device_type", "serial"));
        tree.add_property(id, Property::from_str("device_type", "uart"));
        let node = &tree.container[id];
        assert_eq!(node.props.len(), 1);
        assert_eq!(node.device_type(), Some("uart"));
    }
}
