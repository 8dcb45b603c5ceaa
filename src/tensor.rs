//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use smallvec::SmallVec;
use std::ops::Index;

pub const INLINE_DIMS: usize = 5;

//--------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct SizeAndStride {
	pub size: usize,
	pub stride: usize,
}

impl SizeAndStride {
	pub fn is_contiguous(&self) -> bool {
		self.size <= 1 || self.stride == 1
	}
}

pub type DimVec = SmallVec<[SizeAndStride; INLINE_DIMS]>;

//--------------------------------------------------------------------------------------------------

/// The total number of elements in a tensor is larger than the maximum allowed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TensorSizeOverflowError;

impl std::error::Error for TensorSizeOverflowError {}

impl std::fmt::Display for TensorSizeOverflowError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Tensor size overflows the address space.")
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TensorNewError {
	SizeOverflow,
	DataLenMismatch,
}

impl std::error::Error for TensorNewError {}

impl std::fmt::Display for TensorNewError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::SizeOverflow => write!(f, "Tensor size overflows the address space."),
			Self::DataLenMismatch => {
				write!(f, "Data length does not match the number of elements in the shape.")
			},
		}
	}
}

impl From<TensorSizeOverflowError> for TensorNewError {
	#[cold]
	#[inline(never)]
	fn from(_: TensorSizeOverflowError) -> Self {
		Self::SizeOverflow
	}
}

//--------------------------------------------------------------------------------------------------

/// Computes contiguous strides back to front.
///
/// Overflow is checked while ignoring zero length dimensions, so the same
/// dimensions in a different order would give the same verdict.
pub struct StrideCounter {
	elems: usize,
	nonzero_elems: usize,
}

impl Default for StrideCounter {
	fn default() -> Self {
		Self::new()
	}
}

impl StrideCounter {
	pub fn new() -> Self {
		Self { elems: 1, nonzero_elems: 1 }
	}

	pub fn prepend_dim(&mut self, size: usize) -> Result<SizeAndStride, TensorSizeOverflowError> {
		if size != 0 {
			let Some(e) = self
				.nonzero_elems
				.checked_mul(size)
				.filter(|&e| e <= isize::MAX as usize)
			else {
				return Err(TensorSizeOverflowError);
			};
			self.nonzero_elems = e;
		}

		let stride = self.elems;
		self.elems *= size;

		Ok(SizeAndStride { size, stride })
	}

	pub fn elems(&self) -> usize {
		self.elems
	}
}

fn contiguous_dims(shape: &[usize]) -> Result<(DimVec, usize), TensorSizeOverflowError> {
	let mut dims = DimVec::from_elem(SizeAndStride::default(), shape.len());
	let mut counter = StrideCounter::new();
	for (dim, &size) in dims.iter_mut().zip(shape.iter()).rev() {
		*dim = counter.prepend_dim(size)?;
	}
	Ok((dims, counter.elems()))
}

//--------------------------------------------------------------------------------------------------

pub struct ShapeView<'a> {
	dims: &'a [SizeAndStride],
}

impl<'a> ShapeView<'a> {
	pub fn len(&self) -> usize {
		self.dims.len()
	}

	pub fn is_empty(&self) -> bool {
		self.dims.is_empty()
	}

	pub fn to_vec(&self) -> Vec<usize> {
		self.dims.iter().map(|x| x.size).collect()
	}
}

impl Index<usize> for ShapeView<'_> {
	type Output = usize;

	fn index(&self, index: usize) -> &Self::Output {
		&self.dims[index].size
	}
}

impl Index<isize> for ShapeView<'_> {
	type Output = usize;

	#[allow(clippy::cast_sign_loss)]
	fn index(&self, index: isize) -> &Self::Output {
		let i = if index < 0 { self.dims.len() as isize + index } else { index };
		&self.dims[i as usize].size
	}
}

impl<'a> IntoIterator for ShapeView<'a> {
	type Item = &'a usize;
	type IntoIter =
		std::iter::Map<std::slice::Iter<'a, SizeAndStride>, fn(&SizeAndStride) -> &usize>;

	fn into_iter(self) -> Self::IntoIter {
		self.dims.iter().map(|x| &x.size)
	}
}

//--------------------------------------------------------------------------------------------------

/// Dense tensor with a contiguous row-major layout.
///
/// The first dimension has the largest stride and the last dimension has
/// stride 1. `data.len() == elems == product of dimension sizes`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T> {
	dims: DimVec,
	elems: usize,
	data: Vec<T>,
}

impl<T> Tensor<T> {
	/// Creates a tensor taking ownership of `data` in row-major order.
	pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self, TensorNewError> {
		let (dims, elems) = contiguous_dims(shape)?;
		if data.len() != elems {
			return Err(TensorNewError::DataLenMismatch);
		}
		Ok(Self { dims, elems, data })
	}

	pub fn shape(&self) -> ShapeView {
		ShapeView { dims: &self.dims }
	}

	/// Returns the number of dimensions in the tensor.
	///
	/// This is also known as the rank of the tensor.
	pub fn ndim(&self) -> usize {
		self.dims.len()
	}

	/// Returns the total number of elements in the tensor.
	pub fn elems(&self) -> usize {
		self.elems
	}

	pub fn dims(&self) -> &[SizeAndStride] {
		&self.dims
	}

	/// `dim` should be in the range `0..<ndim`.
	pub fn size(&self, dim: usize) -> usize {
		self.dims[dim].size
	}

	pub fn as_slice(&self) -> &[T] {
		&self.data
	}

	/// Linear offset of a multi-index, or `None` if the index has the wrong
	/// rank or is out of bounds along any dimension.
	pub fn offset_of(&self, index: &[usize]) -> Option<usize> {
		if index.len() != self.dims.len() {
			return None;
		}
		let mut offset = 0;
		for (dim, &i) in self.dims.iter().zip(index.iter()) {
			if i >= dim.size {
				return None;
			}
			offset += i * dim.stride;
		}
		Some(offset)
	}

	pub fn get(&self, index: &[usize]) -> Option<&T> {
		self.data.get(self.offset_of(index)?)
	}

	pub(crate) fn from_parts(dims: DimVec, elems: usize, data: Vec<T>) -> Self {
		debug_assert!(data.len() == elems);
		Self { dims, elems, data }
	}
}

impl<T: Clone> Tensor<T> {
	pub fn new_filled(shape: &[usize], value: T) -> Result<Self, TensorNewError> {
		let (dims, elems) = contiguous_dims(shape)?;
		Ok(Self { dims, elems, data: vec![value; elems] })
	}
}

impl<T: std::fmt::Display> std::fmt::Display for Tensor<T> {
	#[allow(clippy::indexing_slicing)]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.dims.len() {
			0 => write!(f, "{}", self.data[0]),
			1 => {
				write!(f, "[")?;
				for (i, v) in self.data.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{v}")?;
				}
				write!(f, "]")
			},
			2 => {
				let rows = self.dims[0].size;
				let cols = self.dims[1].size;
				writeln!(f, "[")?;
				for r in 0..rows {
					write!(f, "\t[")?;
					for c in 0..cols {
						if c > 0 {
							write!(f, ", ")?;
						}
						write!(f, "{}", self.data[r * cols + c])?;
					}
					writeln!(f, "],")?;
				}
				write!(f, "]")
			},
			_ => {
				write!(f, "tensor of shape [")?;
				for (i, dim) in self.dims.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", dim.size)?;
				}
				write!(f, "]")
			},
		}
	}
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_contiguous_strides() {
		let t = Tensor::from_vec(&[2, 3, 4], (0..24).collect::<Vec<i64>>()).unwrap();
		assert_eq!(t.ndim(), 3);
		assert_eq!(t.elems(), 24);
		assert_eq!(t.dims()[0], SizeAndStride { size: 2, stride: 12 });
		assert_eq!(t.dims()[1], SizeAndStride { size: 3, stride: 4 });
		assert_eq!(t.dims()[2], SizeAndStride { size: 4, stride: 1 });
	}

	#[test]
	fn test_multi_index_access() {
		let t = Tensor::from_vec(&[2, 3, 4], (0..24).collect::<Vec<i64>>()).unwrap();
		assert_eq!(t.get(&[0, 0, 0]), Some(&0));
		assert_eq!(t.get(&[1, 2, 3]), Some(&23));
		assert_eq!(t.get(&[1, 0, 2]), Some(&14));
		assert_eq!(t.get(&[2, 0, 0]), None);
		assert_eq!(t.get(&[0, 0]), None);
	}

	#[test]
	fn test_shape_view_negative_index() {
		let t = Tensor::new_filled(&[2, 3, 4], 0i64).unwrap();
		assert_eq!(t.shape()[-1isize], 4);
		assert_eq!(t.shape()[-3isize], 2);
		assert_eq!(t.shape()[0usize], 2);
		assert_eq!(t.shape().to_vec(), vec![2, 3, 4]);
	}

	#[test]
	fn test_data_len_mismatch() {
		let err = Tensor::from_vec(&[2, 3], vec![0i64; 5]).unwrap_err();
		assert_eq!(err, TensorNewError::DataLenMismatch);
	}

	#[test]
	fn test_size_overflow() {
		let err = Tensor::new_filled(&[usize::MAX, 2], 0i64).unwrap_err();
		assert_eq!(err, TensorNewError::SizeOverflow);
	}
}
