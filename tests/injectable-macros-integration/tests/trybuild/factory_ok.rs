use async_trait::async_trait;
use di_abstractions::{
    global_catalog, InjectableFactory, Instance, ServiceResolver, TypedInjectableFactory,
};
use infrastructure_common::{DependencyError, TypeInfo};
use injectable_macros::{injectable, injectable_factory};
use std::sync::Arc;

#[derive(Debug)]
pub struct Connection {
    pub url: String,
}

#[injectable(target = Connection, factory = ConnectionFactory, singleton)]
#[injectable_factory(produces = Connection)]
#[derive(Debug, Default)]
struct ConnectionFactory;

#[async_trait]
impl TypedInjectableFactory<Connection> for ConnectionFactory {
    async fn create(&self, _resolver: &dyn ServiceResolver) -> Result<Arc<Connection>, DependencyError> {
        Ok(Arc::new(Connection {
            url: "memory://".to_string(),
        }))
    }
}

#[injectable_factory]
#[derive(Debug, Default)]
struct AnyFactory;

#[async_trait]
impl InjectableFactory for AnyFactory {
    async fn create(&self, _resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        Ok(Instance::new(Arc::new(0_u32)))
    }
}

fn main() {
    let catalog = global_catalog();

    let typed = catalog
        .factory(&TypeInfo::of::<ConnectionFactory>())
        .expect("typed factory registered");
    assert_eq!(typed.produces(), Some(TypeInfo::of::<Connection>()));

    let untyped = catalog
        .factory(&TypeInfo::of::<AnyFactory>())
        .expect("untyped factory registered");
    assert_eq!(untyped.produces(), None);

    let declarations = catalog.declarations_of(&TypeInfo::of::<ConnectionFactory>());
    assert_eq!(declarations.len(), 1);
    assert!(declarations[0].activator.is_none());
    assert_eq!(
        declarations[0].descriptor.factory,
        Some(TypeInfo::of::<ConnectionFactory>())
    );
}
