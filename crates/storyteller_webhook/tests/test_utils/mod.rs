#![allow(dead_code, unused_imports)]

mod mock_adapters;

pub use mock_adapters::{GeneratorBehavior, MockGenerator, MockRetriever, RetrieverBehavior, story};
