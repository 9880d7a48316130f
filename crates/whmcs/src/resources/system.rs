//! System procedures

use super::resource;
use crate::{classify::Outcome, error::Result, types::*};

resource! {
    /// System API resource.
    ///
    /// Procedures without parameters take no request argument.
    System
}

impl System {
    /// Ban an IP address.
    pub async fn add_banned_ip(&self, request: &AddBannedIpRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Encrypt a string with the installation's key.
    pub async fn encrypt_password(
        &self,
        request: &EncryptPasswordRequest,
    ) -> Result<PasswordResponse> {
        self.client.execute(request).await
    }

    /// Decrypt a string encrypted with the installation's key.
    pub async fn decrypt_password(
        &self,
        request: &DecryptPasswordRequest,
    ) -> Result<PasswordResponse> {
        self.client.execute(request).await
    }

    /// Read the activity log.
    pub async fn get_activity_log(
        &self,
        request: &GetActivityLogRequest,
    ) -> Result<GetActivityLogResponse> {
        self.client.execute(request).await
    }

    /// Details of the admin the credentials belong to.
    pub async fn get_admin_details(&self) -> Result<GetAdminDetailsResponse> {
        self.client.execute(&GetAdminDetailsRequest::default()).await
    }

    /// List admin users.
    pub async fn get_admin_users(
        &self,
        request: &GetAdminUsersRequest,
    ) -> Result<GetAdminUsersResponse> {
        self.client.execute(request).await
    }

    /// Read the automation log.
    pub async fn get_automation_log(
        &self,
        request: &GetAutomationLogRequest,
    ) -> Result<GetAutomationLogResponse> {
        self.client.execute(request).await
    }

    /// Read one configuration setting.
    pub async fn get_configuration_value(
        &self,
        request: &GetConfigurationValueRequest,
    ) -> Result<ConfigurationValueResponse> {
        self.client.execute(request).await
    }

    /// List currencies.
    pub async fn get_currencies(&self) -> Result<GetCurrenciesResponse> {
        self.client.execute(&GetCurrenciesRequest::default()).await
    }

    /// List email templates.
    pub async fn get_email_templates(
        &self,
        request: &GetEmailTemplatesRequest,
    ) -> Result<GetEmailTemplatesResponse> {
        self.client.execute(request).await
    }

    /// List active payment gateways.
    pub async fn get_payment_methods(&self) -> Result<GetPaymentMethodsResponse> {
        self.client.execute(&GetPaymentMethodsRequest::default()).await
    }

    /// List staff currently online.
    pub async fn get_staff_online(&self) -> Result<GetStaffOnlineResponse> {
        self.client.execute(&GetStaffOnlineRequest::default()).await
    }

    /// Dashboard statistics.
    pub async fn get_stats(&self, request: &GetStatsRequest) -> Result<GetStatsResponse> {
        self.client.execute(request).await
    }

    /// List to-do items.
    pub async fn get_to_do_items(
        &self,
        request: &GetToDoItemsRequest,
    ) -> Result<GetToDoItemsResponse> {
        self.client.execute(request).await
    }

    /// Count to-do items per status.
    pub async fn get_to_do_item_statuses(&self) -> Result<GetToDoItemStatusesResponse> {
        self.client.execute(&GetToDoItemStatusesRequest::default()).await
    }

    /// Write an activity log entry.
    pub async fn log_activity(&self, request: &LogActivityRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Email the admins.
    pub async fn send_admin_email(&self, request: &SendAdminEmailRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Email a client.
    pub async fn send_email(&self, request: &SendEmailRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Change a configuration setting.
    ///
    /// Many installations only allow this through the internal API and answer
    /// `API Command Restricted to Internal API`.
    pub async fn set_configuration_value(
        &self,
        request: &SetConfigurationValueRequest,
    ) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`System::set_configuration_value`], classified.
    pub async fn set_configuration_value_classified(
        &self,
        request: &SetConfigurationValueRequest,
    ) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Fire a custom notification event.
    pub async fn trigger_notification_event(
        &self,
        request: &TriggerNotificationEventRequest,
    ) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Replace the calling admin's notes.
    pub async fn update_admin_notes(&self, request: &UpdateAdminNotesRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Update an announcement.
    pub async fn update_announcement(
        &self,
        request: &UpdateAnnouncementRequest,
    ) -> Result<AnnouncementIdResponse> {
        self.client.execute(request).await
    }

    /// Installation version details.
    pub async fn whmcs_details(&self) -> Result<WhmcsDetailsResponse> {
        self.client.execute(&WhmcsDetailsRequest::default()).await
    }
}
