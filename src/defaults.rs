use crate::model::Question;

/// Sample quiz played when no question file is supplied.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "Which service stores objects in buckets with virtually unlimited capacity?",
            &["Block storage", "Object storage", "File storage", "Archive tape"],
            "Object storage",
        )
        .with_explanation(
            "Object storage keeps data as objects inside buckets and scales without provisioning capacity up front.",
        ),
        Question::new(
            "What does a load balancer primarily do?",
            &[
                "Encrypts data at rest",
                "Distributes incoming traffic across targets",
                "Stores session cookies",
                "Compiles application code",
            ],
            "Distributes incoming traffic across targets",
        )
        .with_explanation(
            "A load balancer spreads requests over healthy targets so no single instance is overwhelmed.",
        ),
        Question::new(
            "Which practice limits the blast radius of a compromised credential?",
            &["Least privilege", "Shared root keys", "Longer passwords only", "Disabling logs"],
            "Least privilege",
        ),
        Question::new(
            "Spreading instances across several availability zones improves what?",
            &["Latency to a single user", "Fault tolerance", "Build speed", "Licensing cost"],
            "Fault tolerance",
        )
        .with_explanation(
            "If one zone fails, instances in the other zones keep serving traffic.",
        ),
    ]
}
