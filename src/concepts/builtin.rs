use super::dataset::{Dataset, NodeSeed};

const NODES: [(&str, f32, f32, f32, f32, &str, &str); 4] = [
    ("Derrida", 100.0, 200.0, 1.0, 1.0, "#FF5733", "Meaning is unstable."),
    ("Foucault", 300.0, 100.0, -1.0, 1.0, "#33FF57", "Power is everywhere."),
    ("Butler", 500.0, 300.0, 1.0, -1.0, "#3357FF", "Gender is performative."),
    ("Deleuze", 700.0, 200.0, -1.0, -1.0, "#FF33A1", "Desire forms assemblages."),
];

const CONCEPTS: [(&str, &str); 11] = [
    ("Derrida ↔ Foucault", "Meaning and power are co-constructed."),
    ("Derrida ↔ Butler", "Language structures gender norms."),
    ("Derrida ↔ Deleuze", "Desire disrupts structures."),
    ("Foucault ↔ Butler", "Discourse shapes identity performances."),
    ("Foucault ↔ Deleuze", "Power is rhizomatic, not centralized."),
    ("Butler ↔ Deleuze", "Gender flows through assemblages."),
    (
        "Derrida ↔ Foucault ↔ Butler",
        "Power, discourse, and performativity destabilize meaning and identity.",
    ),
    (
        "Derrida ↔ Foucault ↔ Deleuze",
        "Desire and power co-construct meaning in rhizomatic ways.",
    ),
    (
        "Derrida ↔ Butler ↔ Deleuze",
        "Deconstruction, gender, and desire form assemblages of becoming.",
    ),
    (
        "Foucault ↔ Butler ↔ Deleuze",
        "Power, performativity, and desire intra-act to produce subjectivities.",
    ),
    (
        "Derrida ↔ Foucault ↔ Butler ↔ Deleuze",
        "Meaning, power, performativity, and desire rupture and reassemble the conditions of thought.",
    ),
];

impl Dataset {
    /// The four theorists the app ships with.
    pub fn builtin() -> Self {
        let nodes = NODES
            .iter()
            .map(|&(label, x, y, dx, dy, color, concept)| NodeSeed {
                label: label.to_owned(),
                x,
                y,
                dx,
                dy,
                color: color.to_owned(),
                concept: concept.to_owned(),
            })
            .collect();

        let concepts = CONCEPTS
            .iter()
            .map(|&(key, text)| (key.to_owned(), text.to_owned()))
            .collect();

        Self { nodes, concepts }
    }
}
