//! Products, orders, client services and provisioning module commands

use super::common::{Ack, Extra, Id, ResultStatus, empty_as_default, lenient_f64, lenient_u64, one_or_many};
use crate::action::{ApiRequest, api_request};
use crate::error::Result;
use crate::params::{IndexStyle, Params};
use crate::validation::{require_any, require_id, require_non_empty, require_non_negative};
use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Billing cycle of a product or service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// No charge
    Free,
    /// Single payment
    Onetime,
    /// Every month
    Monthly,
    /// Every three months
    Quarterly,
    /// Every six months
    Semiannually,
    /// Every year
    Annually,
    /// Every two years
    Biennially,
    /// Every three years
    Triennially,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Product kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Shared hosting account
    Hostingaccount,
    /// Reseller account
    Reselleraccount,
    /// Dedicated or virtual server
    Server,
    /// Anything else
    Other,
}

/// `AddProduct` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddProductRequest {
    /// Product name
    pub name: String,
    /// Product group the product belongs to
    pub gid: Id,
    /// Product kind
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// URL slug
    #[builder(default)]
    pub slug: Option<String>,
    /// Description
    #[builder(default)]
    pub description: Option<String>,
    /// Hide from the order form
    #[builder(default)]
    pub hidden: Option<bool>,
    /// `free`, `onetime` or `recurring`
    #[builder(default)]
    pub paytype: Option<String>,
    /// Provisioning module name
    #[builder(default)]
    pub module: Option<String>,
    /// `on`, `order`, `payment` or empty
    #[builder(default)]
    pub autosetup: Option<String>,
}

impl AddProductRequest {
    /// Create a builder.
    pub fn builder() -> AddProductRequestBuilder {
        AddProductRequestBuilder::default()
    }
}

fn validate_add_product(request: &AddProductRequest) -> Result<()> {
    require_non_empty("name", &request.name)?;
    require_id("gid", &request.gid)
}

api_request!(AddProductRequest => "AddProduct", AddProductResponse, validate = validate_add_product);

/// `AddProduct` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddProductResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// New product
    #[serde(default)]
    pub pid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// One product on an order, sent as `pid[N]`, `domain[N]`, …
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Product to order
    pub pid: Id,
    /// Domain the service is for
    pub domain: Option<String>,
    /// Billing cycle
    pub billingcycle: Option<BillingCycle>,
    /// Price override
    pub priceoverride: Option<f64>,
}

impl OrderItem {
    /// Order a product with platform defaults.
    pub fn new(pid: impl Into<Id>) -> Self {
        Self {
            pid: pid.into(),
            domain: None,
            billingcycle: None,
            priceoverride: None,
        }
    }

    /// Set the domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the billing cycle.
    pub fn billingcycle(mut self, cycle: BillingCycle) -> Self {
        self.billingcycle = Some(cycle);
        self
    }

    /// Override the price.
    pub fn priceoverride(mut self, price: f64) -> Self {
        self.priceoverride = Some(price);
        self
    }
}

/// `AddOrder` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddOrderRequest {
    /// Ordering client
    pub clientid: Id,
    /// Gateway module name
    pub paymentmethod: String,
    /// Ordered products
    #[serde(skip)]
    #[builder(default)]
    pub items: Vec<OrderItem>,
    /// Promotion code
    #[builder(default)]
    pub promocode: Option<String>,
    /// Skip invoice generation
    #[builder(default)]
    pub noinvoice: Option<bool>,
    /// Skip the invoice email
    #[builder(default)]
    pub noinvoiceemail: Option<bool>,
    /// Skip the order confirmation email
    #[builder(default)]
    pub noemail: Option<bool>,
}

impl AddOrderRequest {
    /// Create a builder.
    pub fn builder() -> AddOrderRequestBuilder {
        AddOrderRequestBuilder::default()
    }
}

impl ApiRequest for AddOrderRequest {
    const ACTION: &'static str = "AddOrder";
    type Response = AddOrderResponse;

    fn validate(&self) -> Result<()> {
        require_id("clientid", &self.clientid)?;
        require_non_empty("paymentmethod", &self.paymentmethod)?;
        for (i, item) in self.items.iter().enumerate() {
            require_id(&format!("pid[{i}]"), &item.pid)?;
            if let Some(price) = item.priceoverride {
                require_non_negative(&format!("priceoverride[{i}]"), price)?;
            }
        }
        Ok(())
    }

    fn params(&self) -> Result<Params> {
        let mut params = Params::from_serialize(self)?;
        for (i, item) in self.items.iter().enumerate() {
            params.insert_indexed("pid", i, IndexStyle::Bracket, &item.pid);
            if let Some(domain) = &item.domain {
                params.insert_indexed("domain", i, IndexStyle::Bracket, domain);
            }
            if let Some(cycle) = item.billingcycle {
                params.insert_indexed("billingcycle", i, IndexStyle::Bracket, cycle.as_str());
            }
            if let Some(price) = item.priceoverride {
                params.insert_indexed("priceoverride", i, IndexStyle::Bracket, price);
            }
        }
        Ok(params)
    }
}

impl BillingCycle {
    /// Cycle name as the platform spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Free => "free",
            BillingCycle::Onetime => "onetime",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Semiannually => "semiannually",
            BillingCycle::Annually => "annually",
            BillingCycle::Biennially => "biennially",
            BillingCycle::Triennially => "triennially",
        }
    }
}

/// `AddOrder` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddOrderResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// New order
    #[serde(default)]
    pub orderid: Option<Id>,
    /// Invoice raised for the order
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Comma-separated ids of the services created
    #[serde(default)]
    pub serviceids: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Client services
// ---------------------------------------------------------------------------

/// `GetClientsProducts` filters.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct GetClientsProductsRequest {
    /// Offset
    pub limitstart: Option<u32>,
    /// Page size
    pub limitnum: Option<u32>,
    /// Owning client
    pub clientid: Option<Id>,
    /// Single service lookup
    pub serviceid: Option<Id>,
    /// Product filter
    pub pid: Option<Id>,
    /// Domain filter
    pub domain: Option<String>,
    /// Service username filter
    pub username2: Option<String>,
}

impl GetClientsProductsRequest {
    /// Create a builder.
    pub fn builder() -> GetClientsProductsRequestBuilder {
        GetClientsProductsRequestBuilder::default()
    }
}

api_request!(GetClientsProductsRequest => "GetClientsProducts", GetClientsProductsResponse);

/// A client's service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientProduct {
    /// Service id
    pub id: Id,
    /// Owning client
    #[serde(default)]
    pub clientid: Option<Id>,
    /// Order that created the service
    #[serde(default)]
    pub orderid: Option<Id>,
    /// Product
    #[serde(default)]
    pub pid: Option<Id>,
    /// Product name
    #[serde(default)]
    pub name: Option<String>,
    /// Domain
    #[serde(default)]
    pub domain: Option<String>,
    /// Status, e.g. `Pending` or `Active`
    #[serde(default)]
    pub status: Option<String>,
    /// Billing cycle as reported, e.g. `Monthly`
    #[serde(default)]
    pub billingcycle: Option<String>,
    /// Recurring amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recurringamount: Option<f64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `products` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ClientProductList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub product: Vec<ClientProduct>,
}

/// `GetClientsProducts` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetClientsProductsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total matches
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Returned in this page
    #[serde(default, deserialize_with = "lenient_u64")]
    pub numreturned: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub products: ClientProductList,
}

/// `UpdateClientProduct` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdateClientProductRequest {
    /// Service to update
    pub serviceid: Id,
    /// Move to another product
    #[builder(default)]
    pub pid: Option<Id>,
    /// Move to another server
    #[builder(default)]
    pub serverid: Option<Id>,
    /// Domain
    #[builder(default)]
    pub domain: Option<String>,
    /// Registration date
    #[builder(default)]
    pub regdate: Option<NaiveDate>,
    /// Next due date
    #[builder(default)]
    pub nextduedate: Option<NaiveDate>,
    /// Billing cycle
    #[builder(default)]
    pub billingcycle: Option<BillingCycle>,
    /// First payment amount
    #[builder(default)]
    pub firstpaymentamount: Option<f64>,
    /// Recurring amount
    #[builder(default)]
    pub recurringamount: Option<f64>,
    /// Gateway module name
    #[builder(default)]
    pub paymentmethod: Option<String>,
    /// Status, e.g. `Active`
    #[builder(default)]
    pub status: Option<String>,
    /// Admin notes
    #[builder(default)]
    pub notes: Option<String>,
}

impl UpdateClientProductRequest {
    /// Create a builder.
    pub fn builder() -> UpdateClientProductRequestBuilder {
        UpdateClientProductRequestBuilder::default()
    }
}

fn validate_update_client_product(request: &UpdateClientProductRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)?;
    for (field, amount) in [
        ("firstpaymentamount", request.firstpaymentamount),
        ("recurringamount", request.recurringamount),
    ] {
        if let Some(amount) = amount {
            require_non_negative(field, amount)?;
        }
    }
    require_any(
        "UpdateClientProduct",
        &[
            ("pid", request.pid.is_some()),
            ("serverid", request.serverid.is_some()),
            ("domain", request.domain.is_some()),
            ("regdate", request.regdate.is_some()),
            ("nextduedate", request.nextduedate.is_some()),
            ("billingcycle", request.billingcycle.is_some()),
            ("firstpaymentamount", request.firstpaymentamount.is_some()),
            ("recurringamount", request.recurringamount.is_some()),
            ("paymentmethod", request.paymentmethod.is_some()),
            ("status", request.status.is_some()),
            ("notes", request.notes.is_some()),
        ],
    )
}

api_request!(UpdateClientProductRequest => "UpdateClientProduct", ServiceIdResponse, validate = validate_update_client_product);

/// Reply echoing the affected service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceIdResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Service id
    #[serde(default)]
    pub serviceid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Provisioning module commands
// ---------------------------------------------------------------------------

/// `ModuleCreate` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleCreateRequest {
    /// Service to provision
    pub serviceid: Id,
}

/// `ModuleSuspend` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSuspendRequest {
    /// Service to suspend
    pub serviceid: Id,
    /// Reason shown to the client
    pub suspendreason: Option<String>,
}

/// `ModuleUnsuspend` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleUnsuspendRequest {
    /// Service to unsuspend
    pub serviceid: Id,
}

/// `ModuleChangePackage` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleChangePackageRequest {
    /// Service to re-provision with its current product
    pub serviceid: Id,
}

/// `ModuleChangePw` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleChangePwRequest {
    /// Service whose password to push
    pub serviceid: Id,
    /// New password; the stored one is pushed when absent
    pub servicepassword: Option<String>,
}

/// `ModuleCustom` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleCustomRequest {
    /// Target service
    pub serviceid: Id,
    /// Module function to invoke
    pub func_name: String,
}

macro_rules! service_command {
    ($request:ident) => {
        impl $request {
            /// Target a service.
            pub fn new(serviceid: impl Into<Id>) -> Self {
                Self {
                    serviceid: serviceid.into(),
                }
            }
        }
    };
}

service_command!(ModuleCreateRequest);
service_command!(ModuleUnsuspendRequest);
service_command!(ModuleChangePackageRequest);

impl ModuleSuspendRequest {
    /// Suspend a service.
    pub fn new(serviceid: impl Into<Id>) -> Self {
        Self {
            serviceid: serviceid.into(),
            suspendreason: None,
        }
    }

    /// Set the suspension reason.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.suspendreason = Some(reason.into());
        self
    }
}

impl ModuleChangePwRequest {
    /// Push the stored password.
    pub fn new(serviceid: impl Into<Id>) -> Self {
        Self {
            serviceid: serviceid.into(),
            servicepassword: None,
        }
    }
}

impl ModuleCustomRequest {
    /// Invoke `func_name` on the service's module.
    pub fn new(serviceid: impl Into<Id>, func_name: impl Into<String>) -> Self {
        Self {
            serviceid: serviceid.into(),
            func_name: func_name.into(),
        }
    }
}

fn validate_module_create(request: &ModuleCreateRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)
}

fn validate_module_suspend(request: &ModuleSuspendRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)
}

fn validate_module_unsuspend(request: &ModuleUnsuspendRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)
}

fn validate_module_change_package(request: &ModuleChangePackageRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)
}

fn validate_module_change_pw(request: &ModuleChangePwRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)
}

fn validate_module_custom(request: &ModuleCustomRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)?;
    require_non_empty("func_name", &request.func_name)
}

api_request!(ModuleCreateRequest => "ModuleCreate", Ack, validate = validate_module_create);
api_request!(ModuleSuspendRequest => "ModuleSuspend", Ack, validate = validate_module_suspend);
api_request!(ModuleUnsuspendRequest => "ModuleUnsuspend", Ack, validate = validate_module_unsuspend);
api_request!(ModuleChangePackageRequest => "ModuleChangePackage", Ack, validate = validate_module_change_package);
api_request!(ModuleChangePwRequest => "ModuleChangePw", Ack, validate = validate_module_change_pw);
api_request!(ModuleCustomRequest => "ModuleCustom", Ack, validate = validate_module_custom);

// ---------------------------------------------------------------------------
// Upgrades
// ---------------------------------------------------------------------------

/// What an upgrade changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeType {
    /// Move to another product
    Product,
    /// Change configurable options
    Configoptions,
}

/// `UpgradeProduct` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpgradeProductRequest {
    /// Service to upgrade
    pub serviceid: Id,
    /// Kind of upgrade
    #[serde(rename = "type")]
    pub upgrade_type: UpgradeType,
    /// Only calculate the price, change nothing
    #[builder(default)]
    pub calconly: Option<bool>,
    /// Gateway module name for the upgrade invoice
    #[builder(default)]
    pub paymentmethod: Option<String>,
    /// Target product
    #[builder(default)]
    pub newproductid: Option<Id>,
    /// Target billing cycle
    #[builder(default)]
    pub newproductbillingcycle: Option<BillingCycle>,
    /// Promotion code
    #[builder(default)]
    pub promocode: Option<String>,
}

impl UpgradeProductRequest {
    /// Create a builder.
    pub fn builder() -> UpgradeProductRequestBuilder {
        UpgradeProductRequestBuilder::default()
    }
}

fn validate_upgrade_product(request: &UpgradeProductRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)?;
    if request.upgrade_type == UpgradeType::Product {
        match &request.newproductid {
            Some(pid) => require_id("newproductid", pid)?,
            None => {
                return Err(crate::Error::InvalidRequest(
                    "newproductid is needed for a product upgrade".to_string(),
                ));
            }
        }
    }
    Ok(())
}

api_request!(UpgradeProductRequest => "UpgradeProduct", UpgradeProductResponse, validate = validate_upgrade_product);

/// `UpgradeProduct` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpgradeProductResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Upgrade order, unless `calconly`
    #[serde(default)]
    pub orderid: Option<Id>,
    /// Upgrade invoice, unless `calconly`
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Other fields, including the calculated price
    #[serde(flatten)]
    pub extra: Extra,
}
