/// Edge extraction from polygon faces
use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{WireError, WireResult};
use crate::geometry::Edge;

/// Collect the unique undirected edges of a face list.
///
/// Each face contributes its boundary loop, including the closing pair
/// from the last vertex back to the first. Pairs are canonicalized with
/// the smaller index first, so an edge shared by two faces is kept once
/// no matter how either face is wound.
///
/// Faces must carry at least three indices. Collapsed pairs (both indices
/// equal) are skipped. Index validity against a point list is checked by
/// [`Scene::new`](crate::Scene::new), not here.
pub fn faces_to_edges<F: AsRef<[usize]>>(faces: &[F]) -> WireResult<BTreeSet<Edge>> {
    let mut edges = BTreeSet::new();

    for (face_idx, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(WireError::FaceTooSmall {
                face: face_idx,
                len: face.len(),
            });
        }

        let next = face.iter().cycle().skip(1);
        for (&a, &b) in face.iter().zip(next) {
            if let Some(edge) = Edge::new(a, b) {
                edges.insert(edge);
            }
        }
    }

    debug!(faces = faces.len(), edges = edges.len(), "extracted unique edges");
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(edges: &BTreeSet<Edge>) -> Vec<(usize, usize)> {
        edges.iter().map(Edge::indices).collect()
    }

    #[test]
    fn test_quad_wraps_around() {
        let edges = faces_to_edges(&[vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(pairs(&edges), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_shared_edge_kept_once() {
        // Opposite winding across the shared diagonal 0-2
        let edges = faces_to_edges(&[vec![0, 1, 2], vec![2, 0, 3]]).unwrap();
        assert_eq!(edges.len(), 5);
        assert_eq!(
            pairs(&edges).iter().filter(|&&p| p == (0, 2)).count(),
            1
        );
    }

    #[test]
    fn test_collapsed_pair_skipped() {
        let edges = faces_to_edges(&[vec![0, 0, 1]]).unwrap();
        assert_eq!(pairs(&edges), vec![(0, 1)]);
    }

    #[test]
    fn test_short_face_rejected() {
        let faces: Vec<Vec<usize>> = vec![vec![0, 1, 2], vec![2, 3]];
        let err = faces_to_edges(&faces).unwrap_err();
        assert!(matches!(err, WireError::FaceTooSmall { face: 1, len: 2 }));
    }

    #[test]
    fn test_cube_faces() {
        let faces = [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ];
        let edges = faces_to_edges(&faces).unwrap();
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn test_no_faces() {
        let faces: [Vec<usize>; 0] = [];
        assert!(faces_to_edges(&faces).unwrap().is_empty());
    }
}
