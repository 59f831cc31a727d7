//! Read-only view of a device node.

/// The accessors the modalias builders need from a device node.
///
/// Implementations must return the same data for the duration of one build:
/// the size query and the fill pass read the node twice.
pub trait DeviceNode {
    /// Node name as printed in the `N` field.
    fn display_name(&self) -> &str;

    /// Value of the `device_type` property, or `""` if absent.
    fn device_type(&self) -> &str;

    /// Call `f` once per entry of the `compatible` property, in order.
    fn for_each_compatible(&self, f: &mut dyn FnMut(&str));
}

impl<T: DeviceNode + ?Sized> DeviceNode for &T {
    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn device_type(&self) -> &str {
        (**self).device_type()
    }

    fn for_each_compatible(&self, f: &mut dyn FnMut(&str)) {
        (**self).for_each_compatible(f)
    }
}
