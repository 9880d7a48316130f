//! Service actions

use super::resource;
use crate::{classify::Outcome, error::Result, types::*};

resource! {
    /// Service API resource.
    ///
    /// Module commands run against the provisioning module assigned to the
    /// service's product. A service without a module makes them fail with
    /// `Service not assigned to a module`; the `_classified` variants treat
    /// that as an expected outcome.
    Service
}

impl Service {
    /// Update a client's service.
    pub async fn update_client_product(
        &self,
        request: &UpdateClientProductRequest,
    ) -> Result<ServiceIdResponse> {
        self.client.execute(request).await
    }

    /// Run the module create command.
    pub async fn module_create(&self, request: &ModuleCreateRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Service::module_create`], classified.
    pub async fn module_create_classified(&self, request: &ModuleCreateRequest) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Run the module suspend command.
    pub async fn module_suspend(&self, request: &ModuleSuspendRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Service::module_suspend`], classified.
    pub async fn module_suspend_classified(&self, request: &ModuleSuspendRequest) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Run the module unsuspend command.
    pub async fn module_unsuspend(&self, request: &ModuleUnsuspendRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Service::module_unsuspend`], classified.
    pub async fn module_unsuspend_classified(
        &self,
        request: &ModuleUnsuspendRequest,
    ) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Run the module change package command.
    pub async fn module_change_package(
        &self,
        request: &ModuleChangePackageRequest,
    ) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Service::module_change_package`], classified.
    pub async fn module_change_package_classified(
        &self,
        request: &ModuleChangePackageRequest,
    ) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Run the module change password command.
    pub async fn module_change_pw(&self, request: &ModuleChangePwRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Service::module_change_pw`], classified.
    pub async fn module_change_pw_classified(
        &self,
        request: &ModuleChangePwRequest,
    ) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Run a custom module function.
    pub async fn module_custom(&self, request: &ModuleCustomRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Service::module_custom`], classified.
    pub async fn module_custom_classified(&self, request: &ModuleCustomRequest) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Upgrade a service, or only calculate the price with `calconly`.
    pub async fn upgrade_product(
        &self,
        request: &UpgradeProductRequest,
    ) -> Result<UpgradeProductResponse> {
        self.client.execute(request).await
    }

    /// [`Service::upgrade_product`], classified.
    pub async fn upgrade_product_classified(
        &self,
        request: &UpgradeProductRequest,
    ) -> Outcome<UpgradeProductResponse> {
        self.client.execute_classified(request).await
    }
}
