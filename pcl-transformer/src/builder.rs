use crate::transform::{slice::SliceTransform, Transform};

pub trait TransformBuilder {
    fn build(&self) -> Box<dyn Transform>;
}

pub struct TransectTransformBuilder {
    slice: i64,
}

impl TransectTransformBuilder {
    pub fn new(slice: i64) -> Self {
        Self { slice }
    }
}

impl TransformBuilder for TransectTransformBuilder {
    fn build(&self) -> Box<dyn Transform> {
        Box::new(SliceTransform::new(self.slice))
    }
}
