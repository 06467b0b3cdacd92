use di_abstractions::{Injectable, Instance, ServiceResolver};
use infrastructure_common::{DependencyError, TypeInfo};
use injectable_macros::Injectable;
use std::sync::Arc;

#[derive(Debug)]
struct Settings {
    name: &'static str,
}

#[derive(Injectable)]
struct Consumer {
    settings: Arc<Settings>,
    optional: Option<Arc<String>>,
    counter: u64,
}

#[derive(Injectable)]
struct Pair(Arc<Settings>, u8);

struct OnlySettings;

#[async_trait::async_trait]
impl ServiceResolver for OnlySettings {
    async fn resolve_instance(&self, target: &TypeInfo) -> Result<Instance, DependencyError> {
        if target.is::<Settings>() {
            Ok(Instance::new(Arc::new(Settings { name: "derived" })))
        } else {
            Err(DependencyError::not_registered(target.module_path))
        }
    }

    fn can_resolve(&self, target: &TypeInfo) -> bool {
        target.is::<Settings>()
    }
}

#[tokio::main]
async fn main() {
    let consumer = Consumer::inject(&OnlySettings).await.expect("consumer injected");
    assert_eq!(consumer.settings.name, "derived");
    assert!(consumer.optional.is_none());
    assert_eq!(consumer.counter, 0);

    let pair = Pair::inject(&OnlySettings).await.expect("pair injected");
    assert_eq!(pair.0.name, "derived");
    assert_eq!(pair.1, 0);
}
