use askama::Template;
use askama_web::WebTemplate;

use crate::form::Field;
use crate::predict::PredictionResult;
use crate::session::{Notification, NotificationKind, SessionStatus};

pub struct FieldRow {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

pub struct ResultView {
    pub moid: String,
    pub risk: String,
    pub label: i64,
    pub probability: Option<String>,
    pub hazardous: bool,
}

impl From<&PredictionResult> for ResultView {
    fn from(result: &PredictionResult) -> Self {
        ResultView {
            moid: result.moid_display(),
            risk: result.risk.clone(),
            label: result.risk_label,
            probability: result.probability_display(),
            hazardous: result.is_hazardous(),
        }
    }
}

pub struct NoticeView {
    pub class: &'static str,
    pub message: String,
}

impl From<&Notification> for NoticeView {
    fn from(notification: &Notification) -> Self {
        NoticeView {
            class: match notification.kind {
                NotificationKind::Success => "toast success",
                NotificationKind::Error => "toast error",
            },
            message: notification.message.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub endpoint: String,
    pub fields: Vec<FieldRow>,
    pub loading: bool,
    pub result: Option<ResultView>,
    pub notification: Option<NoticeView>,
}

impl IndexTemplate {
    pub fn new(status: &SessionStatus, endpoint: &str) -> Self {
        IndexTemplate {
            endpoint: endpoint.to_string(),
            fields: Field::ALL
                .into_iter()
                .map(|field| FieldRow {
                    name: field.name(),
                    label: field.label(),
                    value: status.params.get(field).to_string(),
                })
                .collect(),
            loading: status.loading,
            result: status.result.as_ref().map(ResultView::from),
            notification: status.notification.as_ref().map(NoticeView::from),
        }
    }
}
