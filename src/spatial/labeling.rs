//! Face-connected flood fills over voxel masks

use crate::spatial::mask::VoxelMask;

/// Which end of an axis a face lies on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Face at index 0
    Low,
    /// Face at index `n - 1`
    High,
}

/// One of the six faces of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    /// Axis normal to the face
    pub axis: usize,
    /// End of the axis
    pub side: Side,
}

impl Face {
    /// Face at the start of an axis
    pub const fn low(axis: usize) -> Self {
        Self {
            axis,
            side: Side::Low,
        }
    }

    /// Face at the end of an axis
    pub const fn high(axis: usize) -> Self {
        Self {
            axis,
            side: Side::High,
        }
    }

    /// All six grid faces
    pub const fn all() -> [Self; 6] {
        [
            Self::low(0),
            Self::high(0),
            Self::low(1),
            Self::high(1),
            Self::low(2),
            Self::high(2),
        ]
    }

    /// Whether a voxel index lies on this face
    pub fn contains(&self, index: [usize; 3], shape: [usize; 3]) -> bool {
        let (Some(&position), Some(&extent)) = (index.get(self.axis), shape.get(self.axis)) else {
            return false;
        };
        match self.side {
            Side::Low => position == 0,
            Side::High => position + 1 == extent,
        }
    }
}

/// Voxels of `mask` reachable from any set voxel on the given faces
///
/// Connectivity is through shared faces (6-neighbourhood). Components of the
/// mask that touch none of the faces are dropped.
pub fn connected_to_faces(mask: &VoxelMask, faces: &[Face]) -> VoxelMask {
    let shape = mask.shape();
    let mut reached = VoxelMask::new(shape);
    let mut stack: Vec<usize> = mask
        .iter_linear()
        .filter(|&linear| {
            let index = mask.voxel_index(linear);
            faces.iter().any(|face| face.contains(index, shape))
        })
        .collect();
    for &linear in &stack {
        reached.insert_linear(linear);
    }

    while let Some(linear) = stack.pop() {
        let index = mask.voxel_index(linear);
        for neighbour in face_neighbours(index, shape).into_iter().flatten() {
            if let Some(neighbour_linear) = mask.linear_index(neighbour) {
                if mask.contains_linear(neighbour_linear) && !reached.contains_linear(neighbour_linear)
                {
                    reached.insert_linear(neighbour_linear);
                    stack.push(neighbour_linear);
                }
            }
        }
    }
    reached
}

/// Voxels of `mask` lying in components that touch both faces normal to `axis`
pub fn spanning_axis(mask: &VoxelMask, axis: usize) -> VoxelMask {
    let from_inlet = connected_to_faces(mask, &[Face::low(axis)]);
    connected_to_faces(&from_inlet, &[Face::high(axis)])
}

/// The up to six face-adjacent neighbours of a voxel inside the grid
pub const fn face_neighbours(index: [usize; 3], shape: [usize; 3]) -> [Option<[usize; 3]>; 6] {
    let [x, y, z] = index;
    [
        if x > 0 { Some([x - 1, y, z]) } else { None },
        if x + 1 < shape[0] { Some([x + 1, y, z]) } else { None },
        if y > 0 { Some([x, y - 1, z]) } else { None },
        if y + 1 < shape[1] { Some([x, y + 1, z]) } else { None },
        if z > 0 { Some([x, y, z - 1]) } else { None },
        if z + 1 < shape[2] { Some([x, y, z + 1]) } else { None },
    ]
}
