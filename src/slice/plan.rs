//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! Per-axis planning: every source axis gets an effective
//! `(start, end_inclusive, step)` triple, whether it was listed or not.

use smallvec::SmallVec;

use crate::tensor::{INLINE_DIMS, SizeAndStride};

use super::axes::ResolvedAxes;

//--------------------------------------------------------------------------------------------------

/// Effective range of one source axis. `end` is inclusive, unlike the
/// half-open `end` input: the planner subtracts 1 so the extractor can step
/// to the bound itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AxisSpec {
	pub start: usize,
	pub end: usize,
	pub step: usize,
}

impl AxisSpec {
	/// Number of selected indices: `floor((end - start) / step) + 1`.
	///
	/// At least 1, since the validator rejects empty spans.
	pub fn out_size(&self) -> usize {
		(self.end - self.start) / self.step + 1
	}
}

pub(crate) struct SlicePlan {
	pub specs: SmallVec<[AxisSpec; INLINE_DIMS]>,
	pub out_shape: SmallVec<[usize; INLINE_DIMS]>,
}

/// Builds the plan: full-range default per axis, overridden where a listed
/// entry matches. At most one entry can match an axis (duplicates were
/// rejected during normalization).
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::indexing_slicing)]
pub(crate) fn plan(
	src_dims: &[SizeAndStride],
	start: &[i64],
	end: &[i64],
	resolved: &ResolvedAxes,
) -> SlicePlan {
	let mut specs = SmallVec::with_capacity(src_dims.len());
	let mut out_shape = SmallVec::with_capacity(src_dims.len());

	for (axis, dim) in src_dims.iter().enumerate() {
		let mut spec = AxisSpec { start: 0, end: dim.size - 1, step: 1 };
		if let Some(i) = resolved.axes.iter().position(|&a| a == axis) {
			spec = AxisSpec {
				start: start[i] as usize,
				end: (end[i] - 1) as usize,
				step: resolved.steps[i] as usize,
			};
		}
		out_shape.push(spec.out_size());
		specs.push(spec);
	}

	SlicePlan { specs, out_shape }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;
	use crate::slice::axes::normalize;

	fn dims(sizes: &[usize]) -> SmallVec<[SizeAndStride; INLINE_DIMS]> {
		let mut stride = sizes.iter().product::<usize>();
		sizes
			.iter()
			.map(|&size| {
				stride /= size;
				SizeAndStride { size, stride }
			})
			.collect()
	}

	#[test]
	fn test_unlisted_axes_get_full_range() {
		let src = dims(&[4, 6]);
		let resolved = normalize(2, 1, Some(&[1]), None).unwrap();
		let plan = plan(&src, &[2], &[6], &resolved);
		assert_eq!(plan.specs[0], AxisSpec { start: 0, end: 3, step: 1 });
		assert_eq!(plan.specs[1], AxisSpec { start: 2, end: 5, step: 1 });
		assert_eq!(plan.out_shape.as_slice(), &[4, 4]);
	}

	#[test]
	fn test_shape_uses_floor_division() {
		let src = dims(&[10]);
		let resolved = normalize(1, 1, Some(&[0]), Some(&[4])).unwrap();
		let plan = plan(&src, &[0], &[10], &resolved);
		// (9 - 0) / 4 + 1 = 3, selecting indices 0, 4, 8
		assert_eq!(plan.out_shape.as_slice(), &[3]);
	}

	#[test]
	fn test_single_element_span() {
		let src = dims(&[5]);
		let resolved = normalize(1, 1, Some(&[0]), Some(&[3])).unwrap();
		let plan = plan(&src, &[4], &[5], &resolved);
		assert_eq!(plan.out_shape.as_slice(), &[1]);
	}

	#[test]
	fn test_dangling_default_entry_is_ignored() {
		let src = dims(&[4, 4]);
		// defaults on a rank-2 source: {1, 2}, entry 1 matches nothing
		let resolved = normalize(2, 2, None, None).unwrap();
		let plan = plan(&src, &[1, 1], &[4, 3], &resolved);
		assert_eq!(plan.specs[0], AxisSpec { start: 0, end: 3, step: 1 });
		assert_eq!(plan.specs[1], AxisSpec { start: 1, end: 3, step: 1 });
		assert_eq!(plan.out_shape.as_slice(), &[4, 3]);
	}
}
