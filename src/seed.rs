use chrono::NaiveDate;
use tracing::info;

use crate::aggregation::AggregationMethod;
use crate::competition::Competition;
use crate::modality::Modality;
use crate::score::{ScoreStore, ScoringError};
use crate::team::Team;

fn modality(
    id: &str,
    name: &str,
    description: &str,
    rounds: u32,
    max_score: f64,
    method: AggregationMethod,
) -> Modality {
    Modality {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        rounds,
        min_score: 0.0,
        max_score,
        aggregation_method: method,
    }
}

fn team(id: &str, name: &str, institution: &str, members: &[&str], modality_id: &str) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
        institution: institution.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        modality_id: modality_id.to_string(),
    }
}

/// Loads the demo robotics competition: three modalities, five teams, three scores
pub async fn seed_demo_data(store: &dyn ScoreStore) -> Result<(), ScoringError> {
    let modalities = [
        modality(
            "mod-1",
            "Sumô",
            "Competição de robôs lutadores de sumô",
            3,
            100.0,
            AggregationMethod::AverageAll,
        ),
        modality(
            "mod-2",
            "Seguidor de Linha",
            "Competição de robôs que seguem linhas",
            2,
            200.0,
            AggregationMethod::TopThree,
        ),
        modality(
            "mod-3",
            "Resgate",
            "Competição de robôs de resgate",
            3,
            150.0,
            AggregationMethod::DiscardLowest,
        ),
    ];
    for modality in modalities {
        store.create_modality(modality).await?;
    }

    let teams = [
        team(
            "team-1",
            "RoboMasters",
            "IFBA Salvador",
            &["João Silva", "Ana Oliveira", "Pedro Santos"],
            "mod-1",
        ),
        team(
            "team-2",
            "TechBots",
            "IFBA Vitória da Conquista",
            &["Maria Souza", "Carlos Ferreira"],
            "mod-1",
        ),
        team(
            "team-3",
            "CircuitBreakers",
            "IFBA Barreiras",
            &["Luiza Costa", "Marcos Almeida", "Juliana Lima"],
            "mod-2",
        ),
        team(
            "team-4",
            "ByteForce",
            "IFBA Feira de Santana",
            &["Rafael Gomes", "Bianca Martins"],
            "mod-2",
        ),
        team(
            "team-5",
            "RescueBots",
            "IFBA Ilhéus",
            &["Felipe Rocha", "Camila Pereira", "Bruno Oliveira"],
            "mod-3",
        ),
    ];
    for team in teams {
        store.create_team(team).await?;
    }

    store.upsert("team-1", "mod-1", 1, 85.0).await?;
    store.upsert("team-1", "mod-1", 2, 92.0).await?;
    store.upsert("team-2", "mod-1", 1, 78.0).await?;

    let mut competition = Competition::new(
        "IFBA Robotics Competition 2024".to_string(),
        NaiveDate::from_ymd_opt(2024, 8, 15).unwrap_or_default(),
        vec!["mod-1".to_string(), "mod-2".to_string(), "mod-3".to_string()],
        true,
    );
    competition.id = "comp-1".to_string();
    store.create_competition(competition).await?;

    info!("Demo competition data loaded");
    Ok(())
}
