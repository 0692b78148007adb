use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

use crate::dto::inspection_dto::{
    AttachmentRequest, MarkGoodRequest, MarkGoodResponse, SelectRequest, SelectResponse, SessionResponse,
    SignaturesRequest, UpdateItemRequest,
};
use crate::dto::ApiResponse;
use crate::models::{InspectionType, Report, User};
use crate::services::authorization_service::AuthorizationService;
use crate::services::eligibility_service::EligibilityEvaluator;
use crate::services::inspection_service::{
    InspectionService, InspectionSession, MarkGoodScope, Selection, SessionRegistry,
};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Cada inspector opera sobre su propia sesión
pub struct InspectionController {
    service: InspectionService,
    sessions: SessionRegistry,
    evaluator: EligibilityEvaluator,
    today: NaiveDate,
}

impl InspectionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.inspection_service(),
            sessions: state.sessions.clone(),
            evaluator: state.evaluator(),
            today: state.config.today(),
        }
    }

    /// Aplica `f` a la sesión del usuario y devuelve su estado resultante
    async fn mutate<F>(&self, user: &User, f: F) -> AppResult<SessionResponse>
    where
        F: FnOnce(&mut InspectionSession) -> AppResult<()>,
    {
        let inspection_type = AuthorizationService::require_inspector(user)?;
        let mut session = self.sessions.lock(&user.id, inspection_type).await;
        f(&mut session)?;
        Ok(SessionResponse::from((*session).clone()))
    }

    fn inspection_type(user: &User) -> AppResult<InspectionType> {
        AuthorizationService::require_inspector(user)
    }

    pub async fn view(&self, user: &User) -> AppResult<SessionResponse> {
        let inspection_type = Self::inspection_type(user)?;
        Ok(SessionResponse::from(self.sessions.view(&user.id, inspection_type).await))
    }

    pub async fn select(&self, user: &User, request: SelectRequest) -> AppResult<SelectResponse> {
        let inspection_type = Self::inspection_type(user)?;
        request.validate()?;

        let mut session = self.sessions.lock(&user.id, inspection_type).await;
        let Selection { vehicle, driver, verdict } = self
            .service
            .select(&mut session, &request.vehicle_id, &request.driver_id, self.today)
            .await?;

        Ok(SelectResponse {
            block_reason: verdict.block_reason(),
            verdict,
            vehicle_documents: self.evaluator.vehicle_documents(&vehicle, self.today),
            driver_documents: self.evaluator.driver_documents(&driver, self.today),
        })
    }

    pub async fn start(&self, user: &User) -> AppResult<SessionResponse> {
        let inspection_type = Self::inspection_type(user)?;
        let mut session = self.sessions.lock(&user.id, inspection_type).await;
        self.service.start(&mut session, user).await?;
        Ok(SessionResponse::from((*session).clone()))
    }

    pub async fn update_item(&self, user: &User, item_id: &str, request: UpdateItemRequest) -> AppResult<SessionResponse> {
        self.mutate(user, |session| {
            if let Some(state) = request.state {
                session.set_state(item_id, state)?;
            }
            if let Some(observation) = &request.observation {
                session.set_observation(item_id, observation)?;
            }
            Ok(())
        })
        .await
    }

    pub async fn add_item_attachment(
        &self,
        user: &User,
        item_id: &str,
        request: AttachmentRequest,
    ) -> AppResult<SessionResponse> {
        request.validate()?;
        self.mutate(user, |session| Ok(session.add_attachment(item_id, request.into())?))
            .await
    }

    pub async fn remove_item_attachment(&self, user: &User, item_id: &str, index: usize) -> AppResult<SessionResponse> {
        self.mutate(user, |session| {
            session.remove_attachment(item_id, index)?;
            Ok(())
        })
        .await
    }

    pub async fn add_general_attachment(&self, user: &User, request: AttachmentRequest) -> AppResult<SessionResponse> {
        request.validate()?;
        self.mutate(user, |session| Ok(session.add_general_attachment(request.into())?))
            .await
    }

    pub async fn remove_general_attachment(&self, user: &User, index: usize) -> AppResult<SessionResponse> {
        self.mutate(user, |session| {
            session.remove_general_attachment(index)?;
            Ok(())
        })
        .await
    }

    pub async fn mark_good(&self, user: &User, request: MarkGoodRequest) -> AppResult<MarkGoodResponse> {
        let inspection_type = Self::inspection_type(user)?;
        let scope = MarkGoodScope::from(request);
        let marked = self.sessions.lock(&user.id, inspection_type).await.mark_good(&scope)?;
        Ok(MarkGoodResponse { marked })
    }

    pub async fn proceed_to_signature(&self, user: &User) -> AppResult<SessionResponse> {
        self.mutate(user, |session| Ok(session.proceed_to_signature()?)).await
    }

    pub async fn back_to_inspect(&self, user: &User) -> AppResult<SessionResponse> {
        self.mutate(user, |session| Ok(session.back_to_inspect()?)).await
    }

    pub async fn set_signatures(&self, user: &User, request: SignaturesRequest) -> AppResult<SessionResponse> {
        self.mutate(user, |session| {
            if let Some(signature) = &request.inspector {
                session.set_inspector_signature(signature)?;
            }
            if let Some(signature) = &request.driver {
                session.set_driver_signature(signature)?;
            }
            Ok(())
        })
        .await
    }

    pub async fn finalize(&self, user: &User) -> Result<ApiResponse<Report>, AppError> {
        let inspection_type = Self::inspection_type(user)?;
        let mut session = self.sessions.lock(&user.id, inspection_type).await;
        let report = self.service.finalize(&mut session, user, self.today).await?;

        let message = match &report.block_reason {
            Some(reason) => format!("Reporte guardado. {}", reason),
            None => "Reporte guardado exitosamente".to_string(),
        };
        Ok(ApiResponse::success_with_message(report, message))
    }

    pub async fn reset(&self, user: &User) -> AppResult<SessionResponse> {
        let response = self
            .mutate(user, |session| {
                session.reset();
                Ok(())
            })
            .await?;
        info!("🔄 Inspection session reset by {}", user.email);
        Ok(response)
    }
}
