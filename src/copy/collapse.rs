//! Dimension collapsing for strided layouts
//!
//! Adjacent dimensions that are jointly contiguous in every participating
//! layout can be fused into one, reducing loop depth before a kernel is
//! chosen. A row-major tensor of any rank collapses to rank 1; a transposed
//! matrix stays rank 2. Size-1 dimensions are always absorbed since they
//! contribute nothing to iteration.

use crate::array::{Shape, Strides};

/// Collapse jointly contiguous adjacent dimensions
///
/// `strides_list` holds one stride vector per participating array, all of
/// length `shape.len()`. Dimensions `i` and `i + 1` merge only when, for
/// EVERY stride vector, `strides[i] == strides[i + 1] * shape[i + 1]`; a
/// single operand that breaks the relation keeps the pair separate.
///
/// Returns the collapsed shape and one collapsed stride vector per input
/// vector. The result can be empty (rank 0) when every dimension has size
/// 1; callers treat that as a single-element layout.
pub fn collapse_contiguous_dims(
    shape: &[usize],
    strides_list: &[&[isize]],
) -> (Shape, Vec<Strides>) {
    let dims: Vec<usize> = (0..shape.len()).filter(|&i| shape[i] != 1).collect();

    let mut out_shape = Shape::new();
    let mut out_strides: Vec<Strides> = vec![Strides::new(); strides_list.len()];

    let mut k = 0;
    while k < dims.len() {
        let mut size = shape[dims[k]];
        let mut last = dims[k];

        // Extend the run while every layout agrees the next dim is fused
        while k + 1 < dims.len() {
            let next = dims[k + 1];
            let fused = strides_list
                .iter()
                .all(|st| st[last] == st[next] * shape[next] as isize);
            if !fused {
                break;
            }
            size *= shape[next];
            last = next;
            k += 1;
        }

        out_shape.push(size);
        for (out, st) in out_strides.iter_mut().zip(strides_list.iter()) {
            out.push(st[last]);
        }
        k += 1;
    }

    (out_shape, out_strides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_collapses_to_rank_one() {
        let (shape, strides) = collapse_contiguous_dims(&[2, 3, 4], &[&[12, 4, 1]]);
        assert_eq!(shape.as_slice(), &[24]);
        assert_eq!(strides[0].as_slice(), &[1]);
    }

    #[test]
    fn test_transpose_does_not_collapse() {
        let (shape, strides) = collapse_contiguous_dims(&[3, 2], &[&[1, 3]]);
        assert_eq!(shape.as_slice(), &[3, 2]);
        assert_eq!(strides[0].as_slice(), &[1, 3]);
    }

    #[test]
    fn test_partial_collapse() {
        // Last two dims are contiguous, outermost is a strided slice
        let (shape, strides) = collapse_contiguous_dims(&[2, 3, 4], &[&[100, 4, 1]]);
        assert_eq!(shape.as_slice(), &[2, 12]);
        assert_eq!(strides[0].as_slice(), &[100, 1]);
    }

    #[test]
    fn test_one_operand_blocks_the_merge() {
        // Alone, [6, 2, 1] over [4, 3, 2] would fully collapse; the second
        // layout breaks the outer pair
        let (shape, strides) =
            collapse_contiguous_dims(&[4, 3, 2], &[&[6, 2, 1], &[50, 2, 1]]);
        assert_eq!(shape.as_slice(), &[4, 6]);
        assert_eq!(strides[0].as_slice(), &[6, 1]);
        assert_eq!(strides[1].as_slice(), &[50, 1]);
    }

    #[test]
    fn test_size_one_dims_absorbed() {
        let (shape, strides) = collapse_contiguous_dims(&[2, 1, 3], &[&[3, 99, 1]]);
        assert_eq!(shape.as_slice(), &[6]);
        assert_eq!(strides[0].as_slice(), &[1]);

        let (shape, strides) = collapse_contiguous_dims(&[1, 1], &[&[7, 7]]);
        assert!(shape.is_empty());
        assert!(strides[0].is_empty());
    }

    #[test]
    fn test_broadcast_strides_collapse_together() {
        // Zero strides satisfy 0 == 0 * dim, so broadcast dims fuse
        let (shape, strides) = collapse_contiguous_dims(&[4, 3], &[&[0, 0]]);
        assert_eq!(shape.as_slice(), &[12]);
        assert_eq!(strides[0].as_slice(), &[0]);
    }
}
