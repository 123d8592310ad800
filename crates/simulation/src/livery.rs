//! Train liveries: a base colour plus optional texture paths per car face.
//!
//! Head, middle and tail cars each carry their own face set. A face without
//! a texture borrows a related face's texture where one exists, and is
//! otherwise painted in the base colour.

use serde::{Deserialize, Serialize};

/// One face of a car body, named after the box face it textures: `Right`
/// is the local +X face, which rides on the left of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarFace {
    Left,
    Right,
    Top,
    Bottom,
    Front,
    Back,
}

impl CarFace {
    pub const ALL: [CarFace; 6] = [
        CarFace::Left,
        CarFace::Right,
        CarFace::Top,
        CarFace::Bottom,
        CarFace::Front,
        CarFace::Back,
    ];
}

/// Texture paths for the faces of one car. `side` covers both flanks unless
/// `side_left` or `side_right` overrides it. A left flank with neither uses
/// the right flank's texture, and a missing bottom copies the top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarFaces {
    pub side: Option<String>,
    pub side_left: Option<String>,
    pub side_right: Option<String>,
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
}

impl CarFaces {
    /// No face has a texture.
    pub fn is_empty(&self) -> bool {
        *self == CarFaces::default()
    }

    pub fn texture(&self, face: CarFace) -> Option<&str> {
        let path = match face {
            CarFace::Left => self
                .side_left
                .as_ref()
                .or(self.side.as_ref())
                .or(self.side_right.as_ref()),
            CarFace::Right => self.side_right.as_ref().or(self.side.as_ref()),
            CarFace::Top => self.top.as_ref(),
            CarFace::Bottom => self.bottom.as_ref().or(self.top.as_ref()),
            CarFace::Front => self.front.as_ref(),
            CarFace::Back => self.back.as_ref(),
        };
        path.map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Livery {
    /// Linear RGB fallback colour.
    pub color: [f32; 3],
    pub head: CarFaces,
    pub middle: CarFaces,
    pub tail: CarFaces,
}

impl Default for Livery {
    fn default() -> Self {
        Self {
            color: [0.53, 0.53, 0.53],
            head: CarFaces::default(),
            middle: CarFaces::default(),
            tail: CarFaces::default(),
        }
    }
}

impl Livery {
    /// Face set of car `index` in a consist of `cars`. The head and tail
    /// sets only apply when they name at least one texture; otherwise the
    /// car takes the middle set. A single car prefers the head set.
    pub fn faces_for(&self, index: usize, cars: usize) -> &CarFaces {
        if index == 0 && !self.head.is_empty() {
            &self.head
        } else if index + 1 >= cars && !self.tail.is_empty() {
            &self.tail
        } else {
            &self.middle
        }
    }

    /// Every distinct texture path, in first-use order.
    pub fn texture_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for faces in [&self.head, &self.middle, &self.tail] {
            for face in CarFace::ALL {
                if let Some(path) = faces.texture(face) {
                    if !paths.contains(&path) {
                        paths.push(path);
                    }
                }
            }
        }
        paths
    }

    /// A livery with the cab textures on the head and tail cars and a plain
    /// side texture on the rest, all named `<prefix>_N.png`.
    pub fn from_prefix(prefix: &str, side_a: u8, side_b: u8, cab: u8) -> Self {
        let texture = |n: Option<u8>| match n {
            Some(n) => Some(format!("textures/{prefix}_{n}.png")),
            None => Some(format!("textures/{prefix}.png")),
        };
        Self {
            head: CarFaces {
                side_right: texture(Some(side_a)),
                side_left: texture(Some(side_b)),
                front: texture(Some(cab)),
                ..CarFaces::default()
            },
            middle: CarFaces {
                side: texture(None),
                ..CarFaces::default()
            },
            tail: CarFaces {
                side_right: texture(Some(side_b)),
                side_left: texture(Some(side_a)),
                back: texture(Some(cab)),
                ..CarFaces::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_falls_back_for_both_flanks() {
        let faces = CarFaces {
            side: Some("body.png".into()),
            side_left: Some("left.png".into()),
            ..CarFaces::default()
        };
        assert_eq!(faces.texture(CarFace::Left), Some("left.png"));
        assert_eq!(faces.texture(CarFace::Right), Some("body.png"));
        assert_eq!(faces.texture(CarFace::Front), None);
    }

    #[test]
    fn test_faces_for_head_middle_tail() {
        let livery = Livery::from_prefix("tyuou", 1, 3, 2);
        assert_eq!(livery.faces_for(0, 10), &livery.head);
        assert_eq!(livery.faces_for(5, 10), &livery.middle);
        assert_eq!(livery.faces_for(9, 10), &livery.tail);
        assert_eq!(livery.faces_for(0, 1), &livery.head);
    }

    #[test]
    fn test_from_prefix_mirrors_tail_sides() {
        let livery = Livery::from_prefix("soubu", 1, 4, 3);
        assert_eq!(livery.head.texture(CarFace::Right), Some("textures/soubu_1.png"));
        assert_eq!(livery.tail.texture(CarFace::Left), Some("textures/soubu_1.png"));
        assert_eq!(livery.head.texture(CarFace::Front), Some("textures/soubu_3.png"));
        assert_eq!(livery.tail.texture(CarFace::Back), Some("textures/soubu_3.png"));
        assert_eq!(livery.middle.texture(CarFace::Left), Some("textures/soubu.png"));
    }

    #[test]
    fn test_empty_head_and_tail_use_the_middle_set() {
        let livery = Livery {
            middle: CarFaces {
                side: Some("body.png".into()),
                ..CarFaces::default()
            },
            ..Livery::default()
        };
        assert_eq!(livery.faces_for(0, 5).texture(CarFace::Left), Some("body.png"));
        assert_eq!(livery.faces_for(4, 5).texture(CarFace::Right), Some("body.png"));
        assert_eq!(livery.faces_for(0, 1), &livery.middle);
    }

    #[test]
    fn test_single_car_falls_back_to_tail_set() {
        let livery = Livery {
            tail: CarFaces {
                back: Some("cab.png".into()),
                ..CarFaces::default()
            },
            ..Livery::default()
        };
        assert_eq!(livery.faces_for(0, 1), &livery.tail);
    }

    #[test]
    fn test_left_flank_borrows_the_right_texture() {
        let faces = CarFaces {
            side_right: Some("right.png".into()),
            ..CarFaces::default()
        };
        assert_eq!(faces.texture(CarFace::Left), Some("right.png"));
        // The right flank never borrows from the left.
        let faces = CarFaces {
            side_left: Some("left.png".into()),
            ..CarFaces::default()
        };
        assert_eq!(faces.texture(CarFace::Right), None);
    }

    #[test]
    fn test_bottom_copies_top() {
        let faces = CarFaces {
            top: Some("roof.png".into()),
            ..CarFaces::default()
        };
        assert_eq!(faces.texture(CarFace::Bottom), Some("roof.png"));
        assert!(CarFaces::default().is_empty());
        assert!(!faces.is_empty());
    }

    #[test]
    fn test_texture_paths_are_distinct() {
        let livery = Livery::from_prefix("tyuou", 1, 3, 2);
        let paths = livery.texture_paths();
        assert_eq!(paths.len(), 4);
        assert!(Livery::default().texture_paths().is_empty());
    }
}
