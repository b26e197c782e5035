//! Shared in-memory fitted artifacts for integration tests.

use std::sync::Arc;

use corrosion_assistant::model::artifacts::{ArtifactSet, PipelineVariant, TextVectorizerArtifact};
use corrosion_assistant::model::classifier::{DecisionTree, ForestClassifier, TreeNode};
use corrosion_assistant::pipeline::compose::RawObservation;
use corrosion_assistant::pipeline::encoders::{AffineScaler, LabelEncoder, TargetEncoder};
use corrosion_assistant::pipeline::lexical;
use corrosion_assistant::pipeline::reduce::PcaReducer;
use corrosion_assistant::pipeline::vectorize::TfidfVectorizer;

/// A small but fully consistent tfidf-pca artifact set: 19 lexical
/// columns plus a 3-term vocabulary reduce to 2 components, so the
/// composed row is 4 passthroughs + 2 components = 6 columns.
pub fn fitted_artifacts() -> ArtifactSet {
    let vocabulary: Vec<String> = ["acidic", "aerated", "seawater"]
        .iter()
        .map(|term| term.to_string())
        .collect();
    let idf = vec![1.0, 1.2, 1.5];

    let mut input_columns: Vec<String> =
        lexical::COLUMNS.iter().map(|name| name.to_string()).collect();
    input_columns.extend(vocabulary.iter().cloned());
    let width = input_columns.len();

    // First component sums the presence flags, second reads the tfidf
    // block.
    let mut first = vec![0.0; width];
    for weight in first.iter_mut().take(13) {
        *weight = 1.0;
    }
    let mut second = vec![0.0; width];
    for weight in second.iter_mut().skip(lexical::COLUMNS.len()) {
        *weight = 1.0;
    }
    let reducer = PcaReducer {
        input_columns,
        mean: vec![0.0; width],
        components: vec![first, second],
    };

    let classifier = ForestClassifier {
        n_features: 6,
        trees: vec![
            DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 4,
                        threshold: 0.5,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { class_id: 0 },
                    TreeNode::Leaf { class_id: 3 },
                ],
            },
            DecisionTree {
                nodes: vec![TreeNode::Leaf { class_id: 0 }],
            },
            DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 2,
                        threshold: 0.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { class_id: 0 },
                    TreeNode::Leaf { class_id: 1 },
                ],
            },
        ],
    };

    ArtifactSet {
        variant: PipelineVariant::TfidfPca,
        environment_encoder: TargetEncoder {
            mapping: [("Seawater".to_string(), 0.42), ("Acidic".to_string(), 0.77)]
                .into_iter()
                .collect(),
        },
        uns_encoder: LabelEncoder {
            classes: vec!["S30403".to_string(), "S31600".to_string()],
        },
        temperature_scaler: AffineScaler {
            mean: 20.0,
            scale: 10.0,
        },
        text_vectorizer: TextVectorizerArtifact::Tfidf(TfidfVectorizer { vocabulary, idf }),
        reducer,
        classifier: Arc::new(classifier),
    }
}

pub fn seawater_observation() -> RawObservation {
    RawObservation {
        environment: "Seawater".to_string(),
        temperature_c: 25.0,
        concentration_pct: 50.0,
        uns: "S30403".to_string(),
        condition_text: "static, aerated, pH 8".to_string(),
    }
}
