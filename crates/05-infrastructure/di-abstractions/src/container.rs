//! 依赖注入容器抽象接口
//!
//! 容器本身由外部框架提供，这里只定义扫描结果交付给容器所需的注册能力。

use crate::factory::FactoryInvocation;
use crate::registry::{Activator, Construction, RegistrationRequest};
use crate::resolver::ServiceResolver;
use async_trait::async_trait;
use infrastructure_common::{DependencyResult, Lifetime, TypeInfo};

/// 服务注册器 trait
#[async_trait]
pub trait ServiceRegistrar: Send + Sync {
    /// 注册直接构造的服务
    async fn register_type(
        &mut self,
        target: TypeInfo,
        implementation: TypeInfo,
        lifetime: Lifetime,
        activator: Activator,
    ) -> DependencyResult<()>;

    /// 注册经由工厂构造的服务
    async fn register_factory(
        &mut self,
        target: TypeInfo,
        factory: FactoryInvocation,
        lifetime: Lifetime,
    ) -> DependencyResult<()>;

    /// 按构造方式注册一个请求
    async fn register_request(&mut self, request: &RegistrationRequest) -> DependencyResult<()> {
        match &request.construction {
            Construction::Direct(activator) => {
                self.register_type(
                    request.target,
                    request.implementation,
                    request.lifetime,
                    activator.clone(),
                )
                .await
            }
            Construction::Factory(invocation) => {
                self.register_factory(request.target, invocation.clone(), request.lifetime)
                    .await
            }
        }
    }
}

/// 同时具备注册和解析能力的容器
pub trait ServiceContainer: ServiceRegistrar + ServiceResolver {}

impl<C> ServiceContainer for C where C: ServiceRegistrar + ServiceResolver {}
