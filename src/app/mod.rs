// Application layer: concrete pipelines and the renderings they write.

pub mod pipelines;
pub mod report;
