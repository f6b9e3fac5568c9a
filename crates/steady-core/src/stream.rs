use crate::transform::Transform;

/// Append-only sequence of per-frame transforms, indexed by frame number from 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformStream {
    transforms: Vec<Transform>,
}

impl TransformStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the transform of the next frame and return its frame index.
    pub fn push(&mut self, transform: Transform) -> usize {
        self.transforms.push(transform);
        self.transforms.len() - 1
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn get(&self, frame: usize) -> Option<&Transform> {
        self.transforms.get(frame)
    }

    pub fn last(&self) -> Option<&Transform> {
        self.transforms.last()
    }

    pub fn as_slice(&self) -> &[Transform] {
        &self.transforms
    }

    /// `(frame_index, transform)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Transform)> + '_ {
        self.transforms.iter().enumerate()
    }
}

impl FromIterator<Transform> for TransformStream {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

impl From<TransformStream> for Vec<Transform> {
    fn from(stream: TransformStream) -> Self {
        stream.transforms
    }
}
