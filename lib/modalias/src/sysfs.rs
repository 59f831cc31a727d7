//! The `modalias` device attribute.

use crate::{alias::compute_or_write, error::ModaliasError, node::DeviceNode};

/// Render the `modalias` attribute of `node` into `buf`: the alias, `\n`, then a NUL.
///
/// Returns the number of bytes before the NUL. Fails with [ModaliasError::NoDevice]
/// without a node, [ModaliasError::InvalidArgument] if `buf` cannot hold the newline
/// and NUL, and [ModaliasError::OutOfMemory] if the alias does not fit.
pub fn modalias_show<N: DeviceNode + ?Sized>(
    node: Option<&N>,
    buf: &mut [u8],
) -> Result<usize, ModaliasError> {
    let node = node.ok_or(ModaliasError::NoDevice)?;
    let room = buf
        .len()
        .checked_sub(2)
        .ok_or(ModaliasError::InvalidArgument)?;
    // One byte past `room` so a fitting alias is written whole; its NUL becomes the newline.
    let capacity = isize::try_from(room + 1).map_err(|_| ModaliasError::InvalidArgument)?;

    let len = compute_or_write(node, Some(&mut buf[..]), capacity)?;
    if len > room {
        return Err(ModaliasError::OutOfMemory);
    }
    buf[len] = b'\n';
    buf[len + 1] = 0;
    Ok(len + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticNode;

    #[test]
    fn newline_terminated() {
        let node = StaticNode::new("uart@1000", "serial", &["ns16550a"]);
        let mut buf = [0xaau8; 64];
        let len = modalias_show(Some(&node), &mut buf).unwrap();
        assert_eq!(&buf[..len], b"of:Nuart@1000TserialCns16550a\n");
        assert_eq!(buf[len], 0);
    }

    #[test]
    fn exact_fit() {
        let node = StaticNode::new("uart@1000", "serial", &[]);
        let mut buf = [0u8; 22];
        assert_eq!(modalias_show(Some(&node), &mut buf), Ok(21));
        assert_eq!(&buf, b"of:Nuart@1000Tserial\n\0");
    }

    #[test]
    fn too_small() {
        let node = StaticNode::new("uart@1000", "serial", &[]);
        let mut buf = [0u8; 21];
        assert_eq!(
            modalias_show(Some(&node), &mut buf),
            Err(ModaliasError::OutOfMemory)
        );
        assert_eq!(
            modalias_show(Some(&node), &mut buf[..1]),
            Err(ModaliasError::InvalidArgument)
        );
    }

    #[test]
    fn missing_node() {
        assert_eq!(
            modalias_show::<StaticNode>(None, &mut [0u8; 8]),
            Err(ModaliasError::NoDevice)
        );
    }
}
