use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, Order, QueryFilter, QueryOrder, Select, TransactionTrait, UpdateMany,
};

use frontdesk_domain::id::{EmployeeId, VisitId, VisitorId};
use frontdesk_domain::visit::VisitStatus;
use frontdesk_intake_schema::{employees, visitors, visits};

use crate::domain::repository::{HostDirectory, VisitRepository};
use crate::domain::types::{Employee, Visit, Visitor};
use crate::error::IntakeServiceError;

// ── Host directory ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbHostDirectory {
    pub db: DatabaseConnection,
}

fn lower_name() -> SimpleExpr {
    SimpleExpr::FunctionCall(Func::lower(Expr::col(employees::Column::Name)))
}

/// Active employees ordered by lowercase name, then id.
fn active_employees() -> Select<employees::Entity> {
    employees::Entity::find()
        .filter(employees::Column::Active.eq(true))
        .order_by(lower_name(), Order::Asc)
        .order_by_asc(employees::Column::Id)
}

fn exact_name_query(name: &str) -> Select<employees::Entity> {
    active_employees().filter(Expr::expr(lower_name()).eq(name.to_lowercase()))
}

fn name_fragment_query(fragment: &str) -> Select<employees::Entity> {
    let pattern = format!("%{}%", like_escape(&fragment.to_lowercase()));
    active_employees().filter(Expr::expr(lower_name()).like(pattern))
}

/// Escape LIKE wildcards so user input matches literally.
fn like_escape(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl HostDirectory for DbHostDirectory {
    async fn find_active_by_name_exact(
        &self,
        name: &str,
    ) -> Result<Vec<Employee>, IntakeServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(vec![]);
        }
        let models = exact_name_query(name)
            .all(&self.db)
            .await
            .context("find employees by exact name")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }

    async fn find_active_by_name_contains(
        &self,
        fragment: &str,
    ) -> Result<Vec<Employee>, IntakeServiceError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(vec![]);
        }
        let models = name_fragment_query(fragment)
            .all(&self.db)
            .await
            .context("find employees by name fragment")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }

    async fn list_active(&self) -> Result<Vec<Employee>, IntakeServiceError> {
        let models = active_employees()
            .all(&self.db)
            .await
            .context("list active employees")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }
}

fn employee_from_model(model: employees::Model) -> Employee {
    Employee {
        id: EmployeeId(model.id),
        name: model.name,
        department: model.department,
        phone: model.phone,
        email: model.email,
        active: model.active,
    }
}

// ── Visit repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVisitRepository {
    pub db: DatabaseConnection,
}

impl VisitRepository for DbVisitRepository {
    async fn create_with_visitor(
        &self,
        visitor: &Visitor,
        visit: &Visit,
    ) -> Result<(), IntakeServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let visitor = visitor.clone();
                let visit = visit.clone();
                Box::pin(async move {
                    insert_visitor(txn, &visitor).await?;
                    insert_visit(txn, &visit).await?;
                    Ok(())
                })
            })
            .await
            .context("create visitor with visit")?;
        Ok(())
    }

    async fn find_by_id(&self, id: VisitId) -> Result<Option<Visit>, IntakeServiceError> {
        let model = visits::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find visit by id")?;
        model.map(visit_from_model).transpose()
    }

    async fn close(&self, id: VisitId, at: DateTime<Utc>) -> Result<bool, IntakeServiceError> {
        let result = close_query(id, at)
            .exec(&self.db)
            .await
            .context("close visit")?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_notified(
        &self,
        id: VisitId,
        at: DateTime<Utc>,
    ) -> Result<(), IntakeServiceError> {
        visits::ActiveModel {
            id: Set(id.0),
            sms_sent_at: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark visit notified")?;
        Ok(())
    }
}

/// Conditional on `ended_at` so concurrent closes keep the first timestamp.
fn close_query(id: VisitId, at: DateTime<Utc>) -> UpdateMany<visits::Entity> {
    visits::Entity::update_many()
        .col_expr(visits::Column::EndedAt, Expr::value(at))
        .col_expr(visits::Column::Status, Expr::value(VisitStatus::Ended.as_str()))
        .filter(visits::Column::Id.eq(id.0))
        .filter(visits::Column::EndedAt.is_null())
}

async fn insert_visitor(
    txn: &DatabaseTransaction,
    visitor: &Visitor,
) -> Result<(), sea_orm::DbErr> {
    visitors::ActiveModel {
        id: Set(visitor.id.0),
        full_name: Set(visitor.full_name.clone()),
        email: Set(visitor.email.clone()),
        phone: Set(visitor.phone.clone()),
        address: Set(visitor.address.clone()),
        photo_ref: Set(visitor.photo_ref.clone()),
        govt_id_type: Set(visitor.govt_id_type.map(|t| t.as_str().to_owned())),
        govt_id_ref: Set(visitor.govt_id_ref.clone()),
        created_at: Set(visitor.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_visit(txn: &DatabaseTransaction, visit: &Visit) -> Result<(), sea_orm::DbErr> {
    visits::ActiveModel {
        id: Set(visit.id.0),
        visitor_id: Set(visit.visitor_id.0),
        employee_id: Set(visit.employee_id.0),
        purpose: Set(visit.purpose.clone()),
        started_at: Set(visit.started_at),
        ended_at: Set(visit.ended_at),
        status: Set(visit.status.as_str().to_owned()),
        sms_sent_at: Set(visit.sms_sent_at),
        notes: Set(visit.notes.clone()),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn visit_from_model(model: visits::Model) -> Result<Visit, IntakeServiceError> {
    let status: VisitStatus = model
        .status
        .parse()
        .with_context(|| format!("visit {} has unknown status", model.id))?;
    Ok(Visit {
        id: VisitId(model.id),
        visitor_id: VisitorId(model.visitor_id),
        employee_id: EmployeeId(model.employee_id),
        purpose: model.purpose,
        started_at: model.started_at,
        ended_at: model.ended_at,
        status,
        sms_sent_at: model.sms_sent_at,
        notes: model.notes,
    })
}
