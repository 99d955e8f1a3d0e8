//! The visitor intake workflow.
//!
//! ```text
//! AwaitingInput --request_code--> AwaitingOTC --submit(valid code)--> Verified --> Completed
//!       \                              |
//!        `-- open visit in session     `-- wrong/expired/missing code: fresh code issued, stay
//!            short-circuits to Resumed
//! ```

use chrono::Utc;

use frontdesk_domain::channel::Channel;
use frontdesk_domain::contact::is_valid_email;
use frontdesk_domain::id::{SessionId, VisitorId};
use frontdesk_domain::phone;
use frontdesk_domain::visitor::GovtIdType;

use crate::domain::repository::{HostDirectory, NotificationPort, SessionStore, VisitRepository};
use crate::domain::types::{Employee, OTC_LEN, OtcVerdict, Visit, Visitor};
use crate::error::{FieldErrors, IntakeServiceError};
use crate::usecase::messages;
use crate::usecase::otc::OtcManager;
use crate::usecase::tracker::VisitTracker;
use crate::usecase::visit::VisitLifecycle;

const FULL_NAME_MAX: usize = 120;
const EMAIL_MAX: usize = 254;
const EMPLOYEE_NAME_MAX: usize = 200;
const PURPOSE_MAX: usize = 255;
const REF_MAX: usize = 255;

/// Raw intake form as submitted by the visitor.
#[derive(Debug, Clone, Default)]
pub struct IntakeInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub employee_name: String,
    pub purpose: String,
    pub otc: String,
    pub photo_ref: Option<String>,
    pub govt_id_type: Option<String>,
    pub govt_id_ref: Option<String>,
}

/// What the intake page needs to render.
#[derive(Debug, Clone)]
pub struct IntakeStart {
    pub active_visit: Option<Visit>,
    pub hosts: Vec<Employee>,
}

#[derive(Debug, Clone)]
pub enum CodeRequestOutcome {
    Sent,
    Resumed(Visit),
}

#[derive(Debug, Clone)]
pub enum IntakeOutcome {
    Completed(Visit),
    Resumed(Visit),
}

pub struct IntakeUseCase<H, V, S, N>
where
    H: HostDirectory,
    V: VisitRepository,
    S: SessionStore,
    N: NotificationPort,
{
    pub hosts: H,
    pub visits: V,
    pub sessions: S,
    pub notifier: N,
    /// Channels used for the host arrival alert.
    pub alert_channels: Vec<Channel>,
    /// Region for visitor phone normalization.
    pub phone_region: String,
}

impl<H, V, S, N> IntakeUseCase<H, V, S, N>
where
    H: HostDirectory,
    V: VisitRepository,
    S: SessionStore,
    N: NotificationPort,
{
    fn otc(&self) -> OtcManager<'_, S, N> {
        OtcManager {
            sessions: &self.sessions,
            notifier: &self.notifier,
        }
    }

    fn tracker(&self) -> VisitTracker<'_, S, V> {
        VisitTracker {
            sessions: &self.sessions,
            visits: &self.visits,
        }
    }

    pub async fn start(&self, session: SessionId) -> Result<IntakeStart, IntakeServiceError> {
        let active_visit = self.tracker().active_visit(session).await?;
        let hosts = self.hosts.list_active().await?;
        Ok(IntakeStart {
            active_visit,
            hosts,
        })
    }

    /// Issue a code for `email` ahead of the full form.
    pub async fn request_code(
        &self,
        session: SessionId,
        email: &str,
    ) -> Result<CodeRequestOutcome, IntakeServiceError> {
        if let Some(visit) = self.tracker().active_visit(session).await? {
            return Ok(CodeRequestOutcome::Resumed(visit));
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(IntakeServiceError::field("email", "Enter an email address first"));
        }
        if !is_valid_email(email) || email.chars().count() > EMAIL_MAX {
            return Err(IntakeServiceError::field("email", "Enter a valid email address"));
        }

        let issued = self.otc().issue(session, email).await?;
        if !issued.dispatched {
            return Err(IntakeServiceError::DispatchUnavailable);
        }
        Ok(CodeRequestOutcome::Sent)
    }

    /// Verify the code, resolve the host and open the visit.
    pub async fn submit(
        &self,
        session: SessionId,
        input: IntakeInput,
    ) -> Result<IntakeOutcome, IntakeServiceError> {
        if let Some(visit) = self.tracker().active_visit(session).await? {
            return Ok(IntakeOutcome::Resumed(visit));
        }

        let form = validate(input, &self.phone_region)?;

        let otc = self.otc();
        let verdict = otc.validate(session, &form.email, &form.otc).await?;
        if let Some(error) = challenge_error(verdict) {
            let issued = otc.issue(session, &form.email).await?;
            if !issued.dispatched {
                return Err(IntakeServiceError::DispatchUnavailable);
            }
            return Err(error);
        }

        let employee = self
            .resolve_host(&form.employee_name)
            .await?
            .ok_or(IntakeServiceError::HostNotResolved)?;

        let visitor = Visitor {
            id: VisitorId::new(),
            full_name: form.full_name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            photo_ref: form.photo_ref,
            govt_id_type: form.govt_id_type,
            govt_id_ref: form.govt_id_ref,
            created_at: Utc::now(),
        };
        let lifecycle = VisitLifecycle {
            visits: &self.visits,
        };
        // The session link is written before the visit row; a link to a missing
        // visit is cleared on lookup.
        let mut visit = VisitLifecycle::<V>::draft(&visitor, &employee, &form.purpose);
        self.tracker().bind(session, visit.id).await?;
        lifecycle.persist(&visitor, &visit).await?;

        if let Err(e) = otc.clear(session).await {
            tracing::warn!(%session, error = %e, "failed to clear one-time code");
        }

        let dispatched = self.alert_host(&employee, &visitor, &visit.purpose);
        lifecycle
            .record_notification_result(&mut visit, dispatched)
            .await?;

        Ok(IntakeOutcome::Completed(visit))
    }

    /// Exact (case-insensitive) name first, then substring; first candidate wins.
    async fn resolve_host(&self, name: &str) -> Result<Option<Employee>, IntakeServiceError> {
        let exact = self.hosts.find_active_by_name_exact(name).await?;
        if let Some(employee) = exact.into_iter().next() {
            return Ok(Some(employee));
        }
        let partial = self.hosts.find_active_by_name_contains(name).await?;
        Ok(partial.into_iter().next())
    }

    /// Best effort. `true` if any channel accepted the alert.
    fn alert_host(&self, employee: &Employee, visitor: &Visitor, purpose: &str) -> bool {
        let message = messages::arrival_alert(&visitor.full_name, &visitor.phone, purpose);
        let mut dispatched = false;
        for &channel in &self.alert_channels {
            let recipient = if channel.is_phone() {
                &employee.phone
            } else {
                &employee.email
            };
            if recipient.trim().is_empty() {
                tracing::debug!(%channel, employee_id = %employee.id, "host has no address for channel");
                continue;
            }
            let outcome = self
                .notifier
                .send(channel, recipient, &message.subject, &message.body);
            tracing::info!(%channel, employee_id = %employee.id, ?outcome, "host alert dispatched");
            dispatched |= outcome.is_accepted();
        }
        dispatched
    }
}

fn challenge_error(verdict: OtcVerdict) -> Option<IntakeServiceError> {
    match verdict {
        OtcVerdict::Valid => None,
        OtcVerdict::Mismatch => Some(IntakeServiceError::ChallengeMismatch),
        OtcVerdict::Expired => Some(IntakeServiceError::ChallengeExpired),
        OtcVerdict::NoChallenge => Some(IntakeServiceError::NoChallenge),
    }
}

/// Intake form after structural validation.
#[derive(Debug)]
struct ValidForm {
    full_name: String,
    email: String,
    phone: String,
    address: String,
    employee_name: String,
    purpose: String,
    otc: String,
    photo_ref: Option<String>,
    govt_id_type: Option<GovtIdType>,
    govt_id_ref: Option<String>,
}

fn validate(input: IntakeInput, phone_region: &str) -> Result<ValidForm, IntakeServiceError> {
    let mut errors = FieldErrors::new();

    let full_name = required(&mut errors, "full_name", &input.full_name, Some(FULL_NAME_MAX));
    let email = required(&mut errors, "email", &input.email, Some(EMAIL_MAX));
    if !email.is_empty() && !errors.contains_key("email") && !is_valid_email(&email) {
        errors.insert("email", "Enter a valid email address".to_owned());
    }
    let address = required(&mut errors, "address", &input.address, None);
    let employee_name = required(
        &mut errors,
        "employee_name",
        &input.employee_name,
        Some(EMPLOYEE_NAME_MAX),
    );
    let purpose = required(&mut errors, "purpose", &input.purpose, Some(PURPOSE_MAX));

    let raw_phone = required(&mut errors, "phone", &input.phone, None);
    let phone = if raw_phone.is_empty() {
        String::new()
    } else {
        match phone::normalize(&raw_phone, phone_region) {
            Ok(canonical) => canonical,
            Err(_) => {
                errors.insert("phone", "Enter a valid phone number".to_owned());
                String::new()
            }
        }
    };

    let otc = input.otc.trim().to_owned();
    if otc.chars().count() > OTC_LEN {
        errors.insert("otc", format!("Ensure this value has at most {OTC_LEN} characters."));
    }

    let govt_id_type = match optional(input.govt_id_type) {
        None => None,
        Some(raw) => match raw.to_ascii_lowercase().parse::<GovtIdType>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.insert("govt_id_type", "Select a valid choice.".to_owned());
                None
            }
        },
    };
    let photo_ref = optional(input.photo_ref);
    let govt_id_ref = optional(input.govt_id_ref);
    for (field, value) in [("photo_ref", &photo_ref), ("govt_id_ref", &govt_id_ref)] {
        if value.as_ref().is_some_and(|v| v.chars().count() > REF_MAX) {
            errors.insert(field, too_long(REF_MAX));
        }
    }

    if !errors.is_empty() {
        return Err(IntakeServiceError::Validation(errors));
    }
    Ok(ValidForm {
        full_name,
        email,
        phone,
        address,
        employee_name,
        purpose,
        otc,
        photo_ref,
        govt_id_type,
        govt_id_ref,
    })
}

fn required(errors: &mut FieldErrors, field: &'static str, raw: &str, max: Option<usize>) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(field, "This field is required.".to_owned());
    } else if let Some(max) = max.filter(|&max| value.chars().count() > max) {
        errors.insert(field, too_long(max));
    }
    value.to_owned()
}

fn optional(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn too_long(max: usize) -> String {
    format!("Ensure this value has at most {max} characters.")
}
