//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! Defaulting and normalization of the `axes` and `steps` inputs.

use smallvec::SmallVec;

use crate::ErrPack;
use crate::tensor::INLINE_DIMS;

use super::SliceOpError;

//--------------------------------------------------------------------------------------------------

/// Normalized axis/step lists, one entry per `start`/`end` entry.
///
/// Axis values are zero-based after normalization. A value `>= ndim` can only
/// come from the historical defaults and matches no source axis.
#[derive(Debug)]
pub(crate) struct ResolvedAxes {
	pub axes: SmallVec<[usize; INLINE_DIMS]>,
	pub steps: SmallVec<[i64; INLINE_DIMS]>,
}

/// Resolves omitted `axes`/`steps` and converts negative axis references into
/// canonical positive form.
///
/// The default axis list is `{1, 2, .., num_axes}` -- one-based positions
/// inherited from the reference operator, kept verbatim for compatibility.
/// Since matching against source axes is zero-based, the defaults start at
/// the second source axis and the last default may fall off the end of the
/// shape, in which case the entry is ignored by the planner. Explicitly
/// given axes have no such escape hatch: after adding `ndim` to negative
/// values, they must land in `0 .. ndim`.
pub(crate) fn normalize(
	ndim: usize,
	num_axes: usize,
	axes: Option<&[i64]>,
	steps: Option<&[i64]>,
) -> Result<ResolvedAxes, ErrPack<SliceOpError>> {
	let axes: SmallVec<[usize; INLINE_DIMS]> = match axes {
		Some(values) => {
			let mut normalized = SmallVec::with_capacity(num_axes);
			for (i, &value) in values.iter().enumerate() {
				let axis = if value < 0 { value + ndim as i64 } else { value };
				if axis < 0 || axis >= ndim as i64 {
					return Err(SliceOpError::invalid_argument(format!(
						"axes value ({value}) at index {i} is beyond the dimensions of the input tensor (rank = {ndim})"
					)));
				}
				#[allow(clippy::cast_sign_loss)]
				normalized.push(axis as usize);
			}
			normalized
		},
		None => {
			let defaulted: SmallVec<[usize; INLINE_DIMS]> = (1..=num_axes).collect();
			log::trace!("slice: axes defaulted to one-based positions {defaulted:?}");
			defaulted
		},
	};

	for i in 0..axes.len() {
		for j in i + 1..axes.len() {
			if axes[i] == axes[j] {
				return Err(SliceOpError::invalid_argument(format!(
					"repeated axis value ({}) at indices {i} and {j} of the axes input",
					axes[i]
				)));
			}
		}
	}

	let steps: SmallVec<[i64; INLINE_DIMS]> = match steps {
		Some(values) => values.iter().copied().collect(),
		None => SmallVec::from_elem(1, num_axes),
	};

	Ok(ResolvedAxes { axes, steps })
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_axes_are_one_based() {
		let resolved = normalize(3, 2, None, None).unwrap();
		assert_eq!(resolved.axes.as_slice(), &[1, 2]);
		assert_eq!(resolved.steps.as_slice(), &[1, 1]);
	}

	#[test]
	fn test_last_default_may_dangle() {
		// num_axes == ndim: the last default names axis `ndim`, which exists
		// nowhere and will simply match no source axis.
		let resolved = normalize(2, 2, None, None).unwrap();
		assert_eq!(resolved.axes.as_slice(), &[1, 2]);
	}

	#[test]
	fn test_negative_axis_wraps() {
		let resolved = normalize(3, 2, Some(&[-1, -3]), None).unwrap();
		assert_eq!(resolved.axes.as_slice(), &[2, 0]);
	}

	#[test]
	fn test_axis_out_of_range_rejected() {
		assert!(normalize(3, 1, Some(&[3]), None).is_err());
		assert!(normalize(3, 1, Some(&[-4]), None).is_err());
	}

	#[test]
	fn test_duplicate_after_normalization_rejected() {
		// -1 and 2 name the same axis of a rank-3 tensor.
		let err = normalize(3, 2, Some(&[-1, 2]), None).unwrap_err();
		assert!(err.message().contains("repeated axis"));
	}

	#[test]
	fn test_explicit_steps_kept() {
		let resolved = normalize(3, 2, Some(&[0, 1]), Some(&[2, 3])).unwrap();
		assert_eq!(resolved.steps.as_slice(), &[2, 3]);
	}
}
