//! Per-panel view models built from program data and the engine.
//!
//! Renderers consume these as immutable values for one render pass.

use pmdash_core::error::MatrixError;
use pmdash_core::matrix::{
    engagement_strategy, exposure_status, MatrixEntity, OrdinalAxis, PriorityMatrix,
    PriorityMatrixBuilder, UnclassifiedPolicy,
};
use pmdash_core::metrics::{pass_rate, percentage, progress_status, MetricPair};
use pmdash_core::navigation::ViewKey;
use pmdash_core::preferences::Preferences;
use pmdash_core::status::{classify, overall_status, StatusDescriptor, StatusValue};
use serde::Serialize;

use crate::data::{ProgramData, RiskRecord, StakeholderRecord};

pub const TEST_PASS_WARN_BELOW: u8 = 90;
pub const TEST_PASS_FAIL_BELOW: u8 = 70;
pub const VERIFICATION_WARN_BELOW: u8 = 80;
pub const VERIFICATION_FAIL_BELOW: u8 = 50;
pub const SPEND_WARN_ABOVE: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCell {
    pub status: StatusValue,
    pub label: &'static str,
    pub descriptor: StatusDescriptor,
}

#[must_use]
pub fn status_cell(status: StatusValue) -> StatusCell {
    StatusCell {
        status,
        label: status.label(),
        descriptor: classify(status),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTile {
    pub section: &'static str,
    pub view: ViewKey,
    pub status: StatusCell,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub program: String,
    pub overall: StatusCell,
    pub tiles: Vec<SummaryTile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneRow {
    pub id: String,
    pub name: String,
    pub due: String,
    pub complete: bool,
    pub status: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub rows: Vec<MilestoneRow>,
    pub completion: MetricPair,
    pub completion_percent: u8,
    pub overall: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostRow {
    pub id: String,
    pub name: String,
    pub spend: MetricPair,
    pub spent_percent: u8,
    pub status: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetView {
    pub rows: Vec<CostRow>,
    pub total: MetricPair,
    pub total_spent_percent: u8,
    pub overall: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KppRow {
    pub id: String,
    pub name: String,
    pub actual: String,
    pub target: String,
    pub status: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KppView {
    pub rows: Vec<KppRow>,
    pub overall: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessRow {
    pub id: String,
    pub name: String,
    pub trl: MetricPair,
    pub trl_percent: u8,
    pub mrl: MetricPair,
    pub mrl_percent: u8,
    pub status: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessView {
    pub rows: Vec<ReadinessRow>,
    pub overall: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCampaignRow {
    pub id: String,
    pub name: String,
    pub completion_percent: u8,
    pub pass_rate: u8,
    pub status: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestingView {
    pub rows: Vec<TestCampaignRow>,
    pub overall: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementRow {
    pub id: String,
    pub name: String,
    pub verified_percent: u8,
    pub in_process_percent: u8,
    pub status: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementsView {
    pub rows: Vec<RequirementRow>,
    pub overall: StatusCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCellView {
    pub row: OrdinalAxis,
    pub column: OrdinalAxis,
    pub label: &'static str,
    pub heat: StatusCell,
    pub entity_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnclassifiedView {
    pub entity_id: String,
    pub axis: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixView {
    pub row_axis: &'static str,
    pub column_axis: &'static str,
    pub cells: Vec<MatrixCellView>,
    pub unclassified: Vec<UnclassifiedView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StakeholderView {
    pub matrix: MatrixView,
    pub selected: Option<StakeholderRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskView {
    pub matrix: MatrixView,
    pub register: Vec<RiskRecord>,
    pub overall: StatusCell,
    pub selected: Option<RiskRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelView {
    Dashboard(DashboardSummary),
    Schedule(ScheduleView),
    Budget(BudgetView),
    Risk(RiskView),
    Kpp(KppView),
    Readiness(ReadinessView),
    Testing(TestingView),
    Stakeholders(StakeholderView),
    Requirements(RequirementsView),
    /// Neutral placeholder when a panel cannot be built.
    Unavailable { view: ViewKey, reason: String },
}

/// View model for `view`. Fails only when a matrix rejects its input.
pub fn build_panel_view(
    view: ViewKey,
    data: &ProgramData,
    prefs: &Preferences,
    selection: Option<&str>,
    policy: UnclassifiedPolicy,
) -> Result<PanelView, MatrixError> {
    let panel = match view {
        ViewKey::Dashboard => PanelView::Dashboard(build_dashboard_summary(data, prefs)),
        ViewKey::Schedule => PanelView::Schedule(build_schedule_view(data)),
        ViewKey::Budget => PanelView::Budget(build_budget_view(data)),
        ViewKey::Risk => PanelView::Risk(build_risk_view(data, selection, policy)?),
        ViewKey::Kpp => PanelView::Kpp(build_kpp_view(data)),
        ViewKey::Readiness => PanelView::Readiness(build_readiness_view(data)),
        ViewKey::Testing => PanelView::Testing(build_testing_view(data)),
        ViewKey::Stakeholders => {
            PanelView::Stakeholders(build_stakeholder_view(data, selection, policy)?)
        }
        ViewKey::Requirements => PanelView::Requirements(build_requirements_view(data)),
    };
    Ok(panel)
}

/// Like [`build_panel_view`], but a failed build degrades to `Unavailable`.
#[must_use]
pub fn build_panel_view_or_fallback(
    view: ViewKey,
    data: &ProgramData,
    prefs: &Preferences,
    selection: Option<&str>,
    policy: UnclassifiedPolicy,
) -> PanelView {
    match build_panel_view(view, data, prefs, selection, policy) {
        Ok(panel) => panel,
        Err(err) => {
            tracing::error!(view = view.slug(), error = %err, "panel unavailable");
            PanelView::Unavailable {
                view,
                reason: err.to_string(),
            }
        }
    }
}

#[must_use]
pub fn build_dashboard_summary(data: &ProgramData, prefs: &Preferences) -> DashboardSummary {
    let tiles = ViewKey::Dashboard
        .sections()
        .iter()
        .copied()
        .filter_map(|section| {
            let (view, status) = match section {
                "Schedule" => (ViewKey::Schedule, build_schedule_view(data).overall.status),
                "Budget" => (ViewKey::Budget, build_budget_view(data).overall.status),
                "Risk" => (ViewKey::Risk, risk_overall(data)),
                "KPP" => (ViewKey::Kpp, build_kpp_view(data).overall.status),
                "Readiness" => (ViewKey::Readiness, build_readiness_view(data).overall.status),
                "Testing" => (ViewKey::Testing, build_testing_view(data).overall.status),
                _ => return None,
            };
            Some(SummaryTile {
                section,
                view,
                status: status_cell(status),
                collapsed: prefs.is_collapsed(section),
            })
        })
        .collect::<Vec<_>>();
    let overall = overall_status(tiles.iter().map(|tile| tile.status.status));

    DashboardSummary {
        program: data.program.trim().to_owned(),
        overall: status_cell(overall),
        tiles,
    }
}

#[must_use]
pub fn build_schedule_view(data: &ProgramData) -> ScheduleView {
    let rows = data
        .milestones
        .iter()
        .map(|milestone| MilestoneRow {
            id: milestone.id.clone(),
            name: normalize_name(&milestone.name, &milestone.id),
            due: milestone.due.clone(),
            complete: milestone.complete,
            status: status_cell(milestone.status),
        })
        .collect::<Vec<_>>();
    let done = rows.iter().filter(|row| row.complete).count() as u64;
    let completion = MetricPair::new(done, rows.len() as u64);
    let overall = overall_status(rows.iter().map(|row| row.status.status));

    ScheduleView {
        completion_percent: completion.percentage(),
        completion,
        overall: status_cell(overall),
        rows,
    }
}

#[must_use]
pub fn build_budget_view(data: &ProgramData) -> BudgetView {
    let rows = data
        .cost_accounts
        .iter()
        .map(|account| {
            let spend = MetricPair::new(account.actual_cost, account.budget);
            let status = if account.status == StatusValue::Unknown {
                spend_status(spend)
            } else {
                account.status
            };
            CostRow {
                id: account.id.clone(),
                name: normalize_name(&account.name, &account.id),
                spent_percent: spend.percentage(),
                spend,
                status: status_cell(status),
            }
        })
        .collect::<Vec<_>>();
    let total = rows.iter().fold(MetricPair::default(), |acc, row| {
        MetricPair::new(
            acc.numerator.saturating_add(row.spend.numerator),
            acc.denominator.saturating_add(row.spend.denominator),
        )
    });
    let overall = overall_status(rows.iter().map(|row| row.status.status));

    BudgetView {
        total_spent_percent: total.percentage(),
        total,
        overall: status_cell(overall),
        rows,
    }
}

#[must_use]
pub fn build_kpp_view(data: &ProgramData) -> KppView {
    let rows = data
        .kpps
        .iter()
        .map(|kpp| KppRow {
            id: kpp.id.clone(),
            name: normalize_name(&kpp.name, &kpp.id),
            actual: kpp.actual.clone(),
            target: kpp.target.clone(),
            status: status_cell(kpp.status),
        })
        .collect::<Vec<_>>();
    let overall = overall_status(rows.iter().map(|row| row.status.status));
    KppView {
        rows,
        overall: status_cell(overall),
    }
}

#[must_use]
pub fn build_readiness_view(data: &ProgramData) -> ReadinessView {
    let rows = data
        .readiness
        .iter()
        .map(|record| ReadinessRow {
            id: record.id.clone(),
            name: normalize_name(&record.name, &record.id),
            trl: record.trl,
            trl_percent: record.trl.percentage(),
            mrl: record.mrl,
            mrl_percent: record.mrl.percentage(),
            status: status_cell(record.status),
        })
        .collect::<Vec<_>>();
    let overall = overall_status(rows.iter().map(|row| row.status.status));
    ReadinessView {
        rows,
        overall: status_cell(overall),
    }
}

#[must_use]
pub fn build_testing_view(data: &ProgramData) -> TestingView {
    let rows = data
        .test_campaigns
        .iter()
        .map(|campaign| {
            let rate = pass_rate(campaign.passed, campaign.completed);
            let status = match campaign.status {
                StatusValue::Unknown if campaign.completed > 0 => {
                    progress_status(rate, TEST_PASS_WARN_BELOW, TEST_PASS_FAIL_BELOW)
                }
                status => status,
            };
            TestCampaignRow {
                id: campaign.id.clone(),
                name: normalize_name(&campaign.name, &campaign.id),
                completion_percent: percentage(campaign.completed, campaign.planned),
                pass_rate: rate,
                status: status_cell(status),
            }
        })
        .collect::<Vec<_>>();
    let overall = overall_status(rows.iter().map(|row| row.status.status));
    TestingView {
        rows,
        overall: status_cell(overall),
    }
}

#[must_use]
pub fn build_requirements_view(data: &ProgramData) -> RequirementsView {
    let rows = data
        .requirements
        .iter()
        .map(|requirement| {
            let verified = percentage(requirement.verified, requirement.required);
            let status = match requirement.status {
                StatusValue::Unknown if requirement.required > 0 => progress_status(
                    verified,
                    VERIFICATION_WARN_BELOW,
                    VERIFICATION_FAIL_BELOW,
                ),
                status => status,
            };
            RequirementRow {
                id: requirement.id.clone(),
                name: normalize_name(&requirement.name, &requirement.id),
                verified_percent: verified,
                in_process_percent: percentage(requirement.in_process, requirement.required),
                status: status_cell(status),
            }
        })
        .collect::<Vec<_>>();
    let overall = overall_status(rows.iter().map(|row| row.status.status));
    RequirementsView {
        rows,
        overall: status_cell(overall),
    }
}

pub fn build_stakeholder_view(
    data: &ProgramData,
    selection: Option<&str>,
    policy: UnclassifiedPolicy,
) -> Result<StakeholderView, MatrixError> {
    let matrix = PriorityMatrixBuilder::stakeholders().policy(policy).build(
        &data.stakeholders,
        |stakeholder| stakeholder.influence.as_str(),
        |stakeholder| stakeholder.interest.as_str(),
    )?;
    let selected = selection.and_then(|id| matrix.select(id)).cloned();
    Ok(StakeholderView {
        matrix: matrix_view(&matrix, |a, b| {
            (engagement_strategy(a, b), StatusValue::Unknown)
        }),
        selected,
    })
}

pub fn build_risk_view(
    data: &ProgramData,
    selection: Option<&str>,
    policy: UnclassifiedPolicy,
) -> Result<RiskView, MatrixError> {
    let matrix = PriorityMatrixBuilder::risks().policy(policy).build(
        &data.risks,
        |risk| risk.probability.as_str(),
        |risk| risk.impact.as_str(),
    )?;
    let selected = selection.and_then(|id| matrix.select(id)).cloned();
    Ok(RiskView {
        matrix: matrix_view(&matrix, |a, b| {
            let heat = exposure_status(a, b);
            (heat.label(), heat)
        }),
        register: data.risks.clone(),
        overall: status_cell(risk_overall(data)),
        selected,
    })
}

fn risk_overall(data: &ProgramData) -> StatusValue {
    overall_status(data.risks.iter().map(|risk| risk.status))
}

fn matrix_view<T, F>(matrix: &PriorityMatrix<'_, T>, describe: F) -> MatrixView
where
    T: MatrixEntity,
    F: Fn(OrdinalAxis, OrdinalAxis) -> (&'static str, StatusValue),
{
    let (row_axis, column_axis) = matrix.axis_labels();
    let cells = matrix
        .cells()
        .map(|(row, column, entities)| {
            let (label, heat) = describe(row, column);
            MatrixCellView {
                row,
                column,
                label,
                heat: status_cell(heat),
                entity_ids: entities
                    .iter()
                    .map(|entity| entity.entity_id().to_owned())
                    .collect(),
            }
        })
        .collect();
    let unclassified = matrix
        .unclassified()
        .iter()
        .map(|entry| UnclassifiedView {
            entity_id: entry.entity.entity_id().to_owned(),
            axis: entry.axis,
            value: entry.raw_value.clone(),
        })
        .collect();

    MatrixView {
        row_axis,
        column_axis,
        cells,
        unclassified,
    }
}

fn spend_status(spend: MetricPair) -> StatusValue {
    if spend.is_degenerate() {
        return StatusValue::Unknown;
    }
    if spend.numerator > spend.denominator {
        StatusValue::Red
    } else if spend.percentage() > SPEND_WARN_ABOVE {
        StatusValue::Yellow
    } else {
        StatusValue::Green
    }
}

fn normalize_name(name: &str, id: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        id.trim().to_owned()
    } else {
        trimmed.to_owned()
    }
}
