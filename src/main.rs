//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

#![allow(clippy::unwrap_used)]

use ndslice::slice::slice;
use ndslice::tensor::Tensor;

fn main() {
	stderrlog::new().verbosity(log::Level::Debug).init().unwrap();

	let input = Tensor::from_vec(&[4, 6], (0..24).collect::<Vec<i64>>()).unwrap();
	println!("input = {input}");

	// middle rows, every other column
	let start = Tensor::from_vec(&[2], vec![1, 0]).unwrap();
	let end = Tensor::from_vec(&[2], vec![3, 6]).unwrap();
	let axes = Tensor::from_vec(&[2], vec![0, 1]).unwrap();
	let steps = Tensor::from_vec(&[2], vec![1, 2]).unwrap();
	let out = slice(&input, &start, &end, Some(&axes), Some(&steps)).unwrap();
	println!("sliced = {out}");

	// defaulted axes: the historical one-based list {1}, so this slices axis 1
	let start = Tensor::from_vec(&[1], vec![2]).unwrap();
	let end = Tensor::from_vec(&[1], vec![5]).unwrap();
	let out = slice(&input, &start, &end, None, None).unwrap();
	println!("defaulted = {out}");
}
