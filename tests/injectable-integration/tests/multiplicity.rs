//! 多重注册、trait 声明和工厂校验

mod support;

use di_abstractions::{global_catalog, InjectableScanner, ServiceResolverExt};
use infrastructure_common::{InjectionError, Lifetime, TypeInfo};
use infrastructure_composition::{AttributeScanner, InjectionBootstrapper, ScanSettings};
use support::{settings_for, RecordingContainer};

mod stacked {
    use injectable_macros::{injectable, Injectable};

    pub trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    pub trait Labelled: Send + Sync {
        fn label(&self) -> String;
    }

    #[injectable]
    #[injectable(target = dyn Named, singleton)]
    #[injectable(target = dyn Labelled, transient, sort_order = -1)]
    #[derive(Debug, Injectable)]
    pub struct Multi;

    impl Named for Multi {
        fn name(&self) -> &'static str {
            "multi"
        }
    }

    impl Labelled for Multi {
        fn label(&self) -> String {
            format!("label:{}", self.name())
        }
    }
}

mod ambiguous {
    use injectable_macros::{injectable, Injectable};

    #[injectable(singleton)]
    #[injectable(transient)]
    #[derive(Debug, Injectable)]
    pub struct Twice;
}

mod declared_on_trait {
    use injectable_macros::{injectable, Injectable};

    #[injectable(implementation = ConsoleNotifier, singleton)]
    pub trait Notifier: Send + Sync {
        fn notify(&self, message: &str) -> String;
    }

    #[derive(Debug, Injectable)]
    pub struct ConsoleNotifier;

    impl Notifier for ConsoleNotifier {
        fn notify(&self, message: &str) -> String {
            format!("[console] {message}")
        }
    }
}

mod untyped_factory {
    use async_trait::async_trait;
    use di_abstractions::{InjectableFactory, Instance, ServiceResolver};
    use infrastructure_common::DependencyError;
    use injectable_macros::{injectable, injectable_factory};
    use std::sync::Arc;

    #[derive(Debug)]
    pub struct Widget {
        pub size: u32,
    }

    #[injectable(factory = WidgetFactory, transient)]
    #[derive(Debug)]
    pub struct WidgetMarker;

    #[injectable(target = Widget, factory = WidgetFactory)]
    #[injectable_factory]
    #[derive(Debug, Default)]
    pub struct WidgetFactory;

    #[async_trait]
    impl InjectableFactory for WidgetFactory {
        async fn create(&self, _resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
            Ok(Instance::new(Arc::new(Widget { size: 7 })))
        }
    }
}

mod unregistered_factory {
    use injectable_macros::injectable;

    #[derive(Debug, Default)]
    pub struct NotAFactory;

    #[injectable(factory = NotAFactory)]
    #[derive(Debug)]
    pub struct Orphan;
}

mod mismatched_factory {
    use async_trait::async_trait;
    use di_abstractions::{ServiceResolver, TypedInjectableFactory};
    use infrastructure_common::DependencyError;
    use injectable_macros::{injectable, injectable_factory};
    use std::sync::Arc;

    #[derive(Debug)]
    pub struct Produced;

    #[derive(Debug)]
    pub struct Expected;

    #[injectable(target = Expected, factory = ProducedFactory)]
    #[injectable_factory(produces = Produced)]
    #[derive(Debug, Default)]
    pub struct ProducedFactory;

    #[async_trait]
    impl TypedInjectableFactory<Produced> for ProducedFactory {
        async fn create(&self, _resolver: &dyn ServiceResolver) -> Result<Arc<Produced>, DependencyError> {
            Ok(Arc::new(Produced))
        }
    }
}

#[test]
fn test_stacked_attributes_register_independently() {
    let scanner = AttributeScanner::new(settings_for("multiplicity::stacked"));
    let report = scanner.scan(&global_catalog()).unwrap();

    assert_eq!(report.registrations.len(), 3);
    assert!(report
        .registrations
        .iter()
        .all(|request| request.declared == TypeInfo::of::<stacked::Multi>()));

    let targets: Vec<_> = report.registrations.iter().map(|r| r.target).collect();
    assert_eq!(targets[0], TypeInfo::of::<dyn stacked::Labelled>());
    assert!(targets.contains(&TypeInfo::of::<stacked::Multi>()));
    assert!(targets.contains(&TypeInfo::of::<dyn stacked::Named>()));

    let named = report.registrations_for(&TypeInfo::of::<dyn stacked::Named>());
    assert_eq!(named[0].lifetime, Lifetime::Singleton);
    let labelled = report.registrations_for(&TypeInfo::of::<dyn stacked::Labelled>());
    assert_eq!(labelled[0].lifetime, Lifetime::Transient);
}

#[tokio::test]
async fn test_stacked_registrations_resolve_through_each_target() {
    let bootstrapper = InjectionBootstrapper::with_catalog(
        settings_for("multiplicity::stacked"),
        global_catalog(),
    );
    let mut container = RecordingContainer::new();
    bootstrapper.bootstrap(&mut container).await.unwrap();

    let named = container.resolve::<dyn stacked::Named>().await.unwrap();
    assert_eq!(named.name(), "multi");

    let labelled = container.resolve::<dyn stacked::Labelled>().await.unwrap();
    assert_eq!(labelled.label(), "label:multi");

    assert!(container.resolve::<stacked::Multi>().await.is_ok());
}

#[test]
fn test_conflicting_lifetimes_fail_by_default() {
    let scanner = AttributeScanner::new(settings_for("multiplicity::ambiguous"));
    let error = scanner.scan(&global_catalog()).unwrap_err();

    match error {
        InjectionError::AmbiguousRegistration { target, lifetimes, .. } => {
            assert_eq!(target, "multiplicity::ambiguous::Twice");
            assert_eq!(lifetimes.len(), 2);
            assert!(lifetimes.contains(&Lifetime::Singleton));
            assert!(lifetimes.contains(&Lifetime::Transient));
        }
        other => panic!("期望注册不明确错误, 实际: {other}"),
    }
}

#[test]
fn test_conflicting_lifetimes_tolerated_when_configured() {
    let settings = ScanSettings {
        fail_on_ambiguous: false,
        ..settings_for("multiplicity::ambiguous")
    };
    let report = AttributeScanner::new(settings)
        .scan(&global_catalog())
        .unwrap();
    assert_eq!(report.registrations.len(), 2);
}

#[tokio::test]
async fn test_trait_declaration_uses_implementation() {
    let scanner = AttributeScanner::new(settings_for("multiplicity::declared_on_trait"));
    let report = scanner.scan(&global_catalog()).unwrap();

    assert_eq!(report.registrations.len(), 1);
    let request = &report.registrations[0];
    assert_eq!(request.declared, TypeInfo::of::<dyn declared_on_trait::Notifier>());
    assert_eq!(request.target, TypeInfo::of::<dyn declared_on_trait::Notifier>());
    assert_eq!(
        request.implementation,
        TypeInfo::of::<declared_on_trait::ConsoleNotifier>()
    );

    let mut container = RecordingContainer::new();
    InjectionBootstrapper::with_catalog(
        settings_for("multiplicity::declared_on_trait"),
        global_catalog(),
    )
    .bootstrap(&mut container)
    .await
    .unwrap();

    let notifier = container
        .resolve::<dyn declared_on_trait::Notifier>()
        .await
        .unwrap();
    assert_eq!(notifier.notify("hello"), "[console] hello");
}

#[tokio::test]
async fn test_untyped_factory_constructs_target() {
    let bootstrapper = InjectionBootstrapper::with_catalog(
        settings_for("multiplicity::untyped_factory"),
        global_catalog(),
    );
    let mut container = RecordingContainer::new();
    let boot = bootstrapper.bootstrap(&mut container).await.unwrap();
    assert_eq!(boot.registered, 2);

    let widget = container
        .resolve::<untyped_factory::Widget>()
        .await
        .unwrap();
    assert_eq!(widget.size, 7);

    // 工厂产出 Widget，按 WidgetMarker 解析时类型不符
    let marker = container.resolve::<untyped_factory::WidgetMarker>().await;
    assert!(marker.is_err());
}

#[test]
fn test_factory_missing_from_catalog_is_invalid() {
    let scanner = AttributeScanner::new(settings_for("multiplicity::unregistered_factory"));
    let error = scanner.scan(&global_catalog()).unwrap_err();

    match error {
        InjectionError::InvalidFactory { declared, factory, .. } => {
            assert_eq!(declared, "multiplicity::unregistered_factory::Orphan");
            assert_eq!(factory, "multiplicity::unregistered_factory::NotAFactory");
        }
        other => panic!("期望无效工厂错误, 实际: {other}"),
    }
}

#[test]
fn test_typed_factory_product_must_match_target() {
    let scanner = AttributeScanner::new(settings_for("multiplicity::mismatched_factory"));
    let error = scanner.scan(&global_catalog()).unwrap_err();
    assert!(matches!(error, InjectionError::InvalidFactory { .. }));
}
