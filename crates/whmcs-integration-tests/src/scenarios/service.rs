//! Service scenario: add a product, order it, then run service management
//! and provisioning module commands against the new service

use anyhow::{Context, ensure};
use whmcs::types::{
    AddOrderRequest, AddProductRequest, BillingCycle, GetClientsProductsRequest,
    ModuleChangePackageRequest, ModuleChangePwRequest, ModuleCreateRequest, ModuleCustomRequest,
    ModuleSuspendRequest, ModuleUnsuspendRequest, OrderItem, ProductType,
    UpdateClientProductRequest, UpgradeProductRequest, UpgradeType,
};
use whmcs::{Ack, Client, Id, Outcome, Rejection};

use super::{Step, settle};
use crate::ScenarioContext;

/// Domain the ordered service is attached to.
pub const DEMO_DOMAIN: &str = "hostingtest.com";

/// Result of [`run`].
#[derive(Debug, Clone)]
pub enum ServiceRun {
    /// The product group does not exist; nothing after product creation ran
    Skipped(Rejection),
    /// All steps ran
    Completed(ServiceReport),
}

/// Ids and step results of a completed service scenario.
#[derive(Debug, Clone)]
pub struct ServiceReport {
    /// Product that was added
    pub product_id: Id,
    /// Order for the product
    pub order_id: Id,
    /// Service created by the order
    pub service_id: Id,
    /// Module commands in the order they ran
    pub module_commands: Vec<(&'static str, Step)>,
    /// Price calculation for an upgrade
    pub upgrade: Step,
}

fn acknowledged(_: &Ack) -> anyhow::Result<()> {
    Ok(())
}

/// Add a product to the context's group, order it for the demo client, find
/// the service, update it, run every module command and calculate an upgrade.
pub async fn run(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<ServiceRun> {
    let product = client
        .products()
        .add_product_classified(
            &AddProductRequest::builder()
                .name("Test product")
                .gid(ctx.product_group_id.clone())
                .product_type(ProductType::Hostingaccount)
                .build()?,
        )
        .await;
    let product_id = match product {
        Outcome::Success(reply) => reply.pid.context("AddProduct returned no pid")?,
        Outcome::ExpectedRejection(rejection) => {
            tracing::warn!(
                gid = %ctx.product_group_id,
                "Product group does not exist; create one and set WHMCS_TEST_GID to run the service scenario"
            );
            return Ok(ServiceRun::Skipped(rejection));
        }
        Outcome::UnexpectedFailure(error) => return Err(error.into()),
    };

    let order = client
        .orders()
        .add_order(
            &AddOrderRequest::builder()
                .clientid(ctx.client_id.clone())
                .paymentmethod(ctx.payment_method.clone())
                .items(vec![
                    OrderItem::new(product_id.clone())
                        .domain(DEMO_DOMAIN)
                        .billingcycle(BillingCycle::Monthly)
                        .priceoverride(1.0),
                ])
                .build()?,
        )
        .await?;
    let order_id = order.orderid.context("AddOrder returned no orderid")?;
    tracing::info!(%product_id, %order_id, "Product ordered");

    let products = client
        .clients()
        .get_clients_products(
            &GetClientsProductsRequest::builder()
                .domain(DEMO_DOMAIN)
                .limitstart(0u32)
                .limitnum(1u32)
                .build()?,
        )
        .await?;
    let service_id = products
        .products
        .product
        .first()
        .map(|p| p.id.clone())
        .context("GetClientsProducts found no service for the order")?;

    let service = client.service();
    let updated = service
        .update_client_product(
            &UpdateClientProductRequest::builder()
                .serviceid(service_id.clone())
                .notes("this service was updated")
                .build()?,
        )
        .await?;
    ensure!(
        updated.serviceid.as_ref().is_none_or(|id| id == &service_id),
        "UpdateClientProduct returned {:?}, expected {service_id}",
        updated.serviceid
    );

    let module_commands = vec![
        (
            "ModuleCreate",
            settle(
                "ModuleCreate",
                service
                    .module_create_classified(&ModuleCreateRequest::new(service_id.clone()))
                    .await,
                acknowledged,
            )?,
        ),
        (
            "ModuleChangePackage",
            settle(
                "ModuleChangePackage",
                service
                    .module_change_package_classified(&ModuleChangePackageRequest::new(
                        service_id.clone(),
                    ))
                    .await,
                acknowledged,
            )?,
        ),
        (
            "ModuleChangePw",
            settle(
                "ModuleChangePw",
                service
                    .module_change_pw_classified(&ModuleChangePwRequest::new(service_id.clone()))
                    .await,
                acknowledged,
            )?,
        ),
        (
            "ModuleCustom",
            settle(
                "ModuleCustom",
                service
                    .module_custom_classified(&ModuleCustomRequest::new(service_id.clone(), "test"))
                    .await,
                acknowledged,
            )?,
        ),
        (
            "ModuleSuspend",
            settle(
                "ModuleSuspend",
                service
                    .module_suspend_classified(&ModuleSuspendRequest::new(service_id.clone()))
                    .await,
                acknowledged,
            )?,
        ),
        (
            "ModuleUnsuspend",
            settle(
                "ModuleUnsuspend",
                service
                    .module_unsuspend_classified(&ModuleUnsuspendRequest::new(service_id.clone()))
                    .await,
                acknowledged,
            )?,
        ),
    ];

    let upgrade = settle(
        "UpgradeProduct",
        service
            .upgrade_product_classified(
                &UpgradeProductRequest::builder()
                    .serviceid(service_id.clone())
                    .upgrade_type(UpgradeType::Product)
                    .calconly(true)
                    .newproductid(product_id.clone())
                    .newproductbillingcycle(BillingCycle::Monthly)
                    .build()?,
            )
            .await,
        |_| Ok(()),
    )?;

    Ok(ServiceRun::Completed(ServiceReport {
        product_id,
        order_id,
        service_id,
        module_commands,
        upgrade,
    }))
}
