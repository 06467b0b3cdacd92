use async_trait::async_trait;
use di_abstractions::{global_catalog, Injectable, ServiceResolver};
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use injectable_macros::{injectable, Injectable};

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[injectable]
#[injectable(target = dyn Greeter, lifetime = singleton, instantiate_on_boot, boot_priority = 255)]
#[derive(Debug, Injectable)]
struct OkService;

impl Greeter for OkService {
    fn greet(&self) -> String {
        "ok".to_string()
    }
}

#[injectable(transient, sort_order = -10)]
#[derive(Debug)]
enum Mode {
    Fast,
}

#[async_trait]
impl Injectable for Mode {
    async fn inject(_resolver: &dyn ServiceResolver) -> Result<Self, DependencyError> {
        Ok(Mode::Fast)
    }
}

fn main() {
    let catalog = global_catalog();

    let declarations = catalog.declarations_of(&TypeInfo::of::<OkService>());
    assert_eq!(declarations.len(), 2);
    assert!(declarations
        .iter()
        .any(|d| d.descriptor.lifetime == Lifetime::Singleton && d.descriptor.instantiate_on_boot));
    assert!(declarations.iter().all(|d| d.activator.is_some()));

    let mode = catalog.declarations_of(&TypeInfo::of::<Mode>());
    assert_eq!(mode.len(), 1);
    assert_eq!(mode[0].descriptor.sort_order, -10);
    assert_eq!(mode[0].descriptor.lifetime, Lifetime::Transient);
}
