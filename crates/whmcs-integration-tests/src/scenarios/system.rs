//! System scenarios: bans, the password vault, logs, staff, settings,
//! reference data, email and notifications

use anyhow::{Context, ensure};
use whmcs::types::{
    AddBannedIpRequest, DecryptPasswordRequest, DeleteAnnouncementRequest, EmailType,
    EncryptPasswordRequest, GetActivityLogRequest, GetAdminUsersRequest,
    GetAutomationLogRequest, GetConfigurationValueRequest, GetEmailTemplatesRequest,
    GetStatsRequest, GetToDoItemsRequest, LogActivityRequest, SendAdminEmailRequest,
    SendEmailRequest, SetConfigurationValueRequest, TriggerNotificationEventRequest,
    UpdateAdminNotesRequest, UpdateAnnouncementRequest,
};
use whmcs::{Client, Id};

use super::support::add_demo_announcement;
use super::{Step, settle};
use crate::ScenarioContext;

/// Password round-tripped through the vault.
pub const DEMO_PASSWORD: &str = "n2w47bVW#QABW63vVw";

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct SystemReport {
    /// Text the platform encrypted the demo password to
    pub encrypted_password: String,
    /// Admin the credentials belong to
    pub admin_id: Id,
    /// Number of admin users listed
    pub admin_users: usize,
    /// Currencies configured
    pub currencies: usize,
    /// Active payment gateways
    pub payment_methods: usize,
    /// How changing a setting ended
    pub set_configuration: Step,
    /// Announcement that was updated
    pub announcement_id: Id,
    /// Installation version
    pub version: Option<String>,
}

/// Encrypt then decrypt the demo password and return the encrypted text.
pub async fn password_round_trip(client: &Client) -> anyhow::Result<String> {
    let system = client.system();

    let encrypted = system
        .encrypt_password(&EncryptPasswordRequest::new(DEMO_PASSWORD))
        .await?
        .password
        .context("EncryptPassword returned no password")?;
    let decrypted = system
        .decrypt_password(&DecryptPasswordRequest::new(encrypted.clone()))
        .await?
        .password
        .context("DecryptPassword returned no password")?;
    ensure!(decrypted == DEMO_PASSWORD, "DecryptPassword did not restore the password");

    Ok(encrypted)
}

/// Call every system procedure once and check the reply shapes.
pub async fn run(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<SystemReport> {
    let system = client.system();

    system
        .add_banned_ip(&AddBannedIpRequest::new("1.2.3.4").reason("just because").days(1))
        .await?;

    let encrypted_password = password_round_trip(client).await?;

    let activity = system
        .get_activity_log(&GetActivityLogRequest::page(0, 1))
        .await?;
    ensure!(activity.activity.entry.len() <= 1, "GetActivityLog ignored limitnum");

    let admin_id = system
        .get_admin_details()
        .await?
        .adminid
        .context("GetAdminDetails returned no adminid")?;
    let admin_users = system
        .get_admin_users(&GetAdminUsersRequest::default())
        .await?
        .admin_users
        .len();

    let automation = system
        .get_automation_log(&GetAutomationLogRequest::default())
        .await?;
    ensure!(
        automation.current_datetime.is_some(),
        "GetAutomationLog returned no currentDatetime"
    );

    let setting = system
        .get_configuration_value(&GetConfigurationValueRequest::new("Language"))
        .await?;
    ensure!(setting.setting.is_some(), "GetConfigurationValue returned no setting");

    let currencies = system.get_currencies().await?.currencies.currency.len();
    system
        .get_email_templates(&GetEmailTemplatesRequest::default())
        .await?;
    let payment_methods = system
        .get_payment_methods()
        .await?
        .paymentmethods
        .paymentmethod
        .len();
    system.get_staff_online().await?;

    let stats = system.get_stats(&GetStatsRequest::default()).await?;
    ensure!(stats.income_today.is_some(), "GetStats returned no income_today");

    system.get_to_do_items(&GetToDoItemsRequest::default()).await?;
    system.get_to_do_item_statuses().await?;

    system
        .log_activity(&LogActivityRequest::new("log activity test").client(ctx.client_id.clone()))
        .await?;
    system
        .send_admin_email(
            &SendAdminEmailRequest::builder()
                .customsubject("notification test")
                .custommessage("this is a notification test")
                .build()?,
        )
        .await?;
    system
        .send_email(
            &SendEmailRequest::builder()
                .id(ctx.client_id.clone())
                .customsubject("notification test")
                .custommessage("this is a notification test")
                .customtype(EmailType::General)
                .build()?,
        )
        .await?;

    let set_configuration = settle(
        "SetConfigurationValue",
        system
            .set_configuration_value_classified(&SetConfigurationValueRequest::new(
                "CompanyName",
                "My company",
            ))
            .await,
        |_| Ok(()),
    )?;

    system
        .trigger_notification_event(
            &TriggerNotificationEventRequest::builder()
                .notification_identifier("test")
                .title("Notification test")
                .message("this is a custom notification")
                .build()?,
        )
        .await?;
    system
        .update_admin_notes(&UpdateAdminNotesRequest::new("This is a note"))
        .await?;

    let announcement_id = add_demo_announcement(client).await?;
    system
        .update_announcement(
            &UpdateAnnouncementRequest::builder()
                .announcementid(announcement_id.clone())
                .title("Can you hear me Major Tom?")
                .build()?,
        )
        .await?;
    client
        .support()
        .delete_announcement(&DeleteAnnouncementRequest::new(announcement_id.clone()))
        .await?;

    let details = system.whmcs_details().await?;
    let version = details
        .whmcs
        .context("WhmcsDetails returned no whmcs block")?
        .version;

    Ok(SystemReport {
        encrypted_password,
        admin_id,
        admin_users,
        currencies,
        payment_methods,
        set_configuration,
        announcement_id,
        version,
    })
}
