use std::collections::HashMap;

use super::load::{DatasetFile, DetailEntry, EntityRecord, RelationRecord, build_graph};
use super::model::KnowledgeGraph;

fn entity(
    id: &str,
    label: &str,
    kind: &str,
    level: u32,
    size: f32,
    connection_count: usize,
    tags: &[&str],
    description: &str,
) -> EntityRecord {
    EntityRecord {
        id: id.to_string(),
        label: label.to_string(),
        kind: kind.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        level,
        size,
        connection_count,
    }
}

fn relation(source_id: &str, target_id: &str, kind: &str) -> RelationRecord {
    RelationRecord {
        source_id: source_id.to_string(),
        target_id: target_id.to_string(),
        kind: kind.to_string(),
    }
}

fn detail(statement: &str, discussion: &str) -> DetailEntry {
    DetailEntry {
        title: String::new(),
        statement: statement.to_string(),
        discussion: discussion.to_string(),
    }
}

pub fn builtin_graph() -> KnowledgeGraph {
    let entities = vec![
        entity(
            "ax-extensionality",
            "Axiom of Extensionality",
            "axiom",
            1,
            1.0,
            3,
            &["set-theory", "zfc"],
            "Two sets are equal exactly when they have the same elements.",
        ),
        entity(
            "ax-pairing",
            "Axiom of Pairing",
            "axiom",
            1,
            1.0,
            2,
            &["set-theory", "zfc"],
            "For any two sets there is a set containing exactly those two.",
        ),
        entity(
            "ax-union",
            "Axiom of Union",
            "axiom",
            1,
            1.0,
            2,
            &["set-theory", "zfc"],
            "The union over any set of sets is itself a set.",
        ),
        entity(
            "ax-powerset",
            "Axiom of Power Set",
            "axiom",
            1,
            1.0,
            3,
            &["set-theory", "zfc"],
            "Every set has a set of all its subsets.",
        ),
        entity(
            "ax-infinity",
            "Axiom of Infinity",
            "axiom",
            1,
            1.2,
            3,
            &["set-theory", "zfc"],
            "An inductive set exists.",
        ),
        entity(
            "ax-choice",
            "Axiom of Choice",
            "axiom",
            1,
            1.6,
            5,
            &["set-theory", "choice"],
            "Every family of nonempty sets admits a choice function.",
        ),
        entity(
            "ax-peano",
            "Peano Axioms",
            "axiom",
            1,
            1.4,
            4,
            &["arithmetic", "foundations"],
            "Axioms characterising the natural numbers with zero and successor.",
        ),
        entity(
            "ax-completeness",
            "Completeness of the Reals",
            "axiom",
            1,
            1.6,
            6,
            &["analysis", "real-numbers"],
            "Every nonempty set of reals bounded above has a least upper bound.",
        ),
        entity(
            "def-function",
            "Function",
            "definition",
            2,
            1.2,
            5,
            &["set-theory", "foundations"],
            "A relation assigning to each element of the domain exactly one value.",
        ),
        entity(
            "def-partial-order",
            "Partial Order",
            "definition",
            2,
            1.0,
            3,
            &["order-theory"],
            "A reflexive, antisymmetric, transitive relation on a set.",
        ),
        entity(
            "def-bound",
            "Upper Bound and Supremum",
            "definition",
            2,
            1.0,
            4,
            &["order-theory", "analysis"],
            "Bounds of a subset in an ordered set; the supremum is the least upper bound.",
        ),
        entity(
            "def-sequence-limit",
            "Limit of a Sequence",
            "definition",
            2,
            1.3,
            6,
            &["analysis", "limits"],
            "The value a sequence approaches within any epsilon beyond some index.",
        ),
        entity(
            "def-continuity",
            "Continuity",
            "definition",
            2,
            1.3,
            6,
            &["analysis", "topology"],
            "Preservation of limits: preimages of open sets are open.",
        ),
        entity(
            "def-derivative",
            "Derivative",
            "definition",
            2,
            1.2,
            4,
            &["analysis", "calculus"],
            "The limit of difference quotients of a function at a point.",
        ),
        entity(
            "def-metric-space",
            "Metric Space",
            "definition",
            2,
            1.2,
            4,
            &["topology", "analysis"],
            "A set with a distance function satisfying the triangle inequality.",
        ),
        entity(
            "def-compactness",
            "Compactness",
            "definition",
            2,
            1.3,
            5,
            &["topology"],
            "Every open cover admits a finite subcover.",
        ),
        entity(
            "def-group",
            "Group",
            "definition",
            2,
            1.2,
            4,
            &["algebra"],
            "A set with an associative operation, identity, and inverses.",
        ),
        entity(
            "def-cardinality",
            "Cardinality",
            "definition",
            2,
            1.1,
            3,
            &["set-theory"],
            "Size of a set measured by bijective correspondence.",
        ),
        entity(
            "lem-zorn",
            "Zorn's Lemma",
            "lemma",
            3,
            1.5,
            4,
            &["set-theory", "choice", "order-theory"],
            "A poset in which every chain has an upper bound contains a maximal element.",
        ),
        entity(
            "lem-nested-intervals",
            "Nested Interval Lemma",
            "lemma",
            3,
            1.1,
            3,
            &["analysis", "real-numbers"],
            "A nested sequence of closed bounded intervals has nonempty intersection.",
        ),
        entity(
            "lem-cauchy-criterion",
            "Cauchy Criterion",
            "lemma",
            3,
            1.2,
            3,
            &["analysis", "limits"],
            "A real sequence converges exactly when it is Cauchy.",
        ),
        entity(
            "lem-rolle",
            "Rolle's Lemma",
            "lemma",
            3,
            1.0,
            2,
            &["analysis", "calculus"],
            "A differentiable function equal at two points has a critical point between them.",
        ),
        entity(
            "thm-well-ordering",
            "Well-Ordering Theorem",
            "theorem",
            4,
            1.3,
            2,
            &["set-theory", "choice"],
            "Every set can be well-ordered.",
        ),
        entity(
            "thm-bolzano-weierstrass",
            "Bolzano-Weierstrass Theorem",
            "theorem",
            4,
            1.5,
            4,
            &["analysis", "compactness"],
            "Every bounded real sequence has a convergent subsequence.",
        ),
        entity(
            "thm-heine-borel",
            "Heine-Borel Theorem",
            "theorem",
            4,
            1.4,
            4,
            &["analysis", "topology", "compactness"],
            "A subset of Euclidean space is compact iff closed and bounded.",
        ),
        entity(
            "thm-ivt",
            "Intermediate Value Theorem",
            "theorem",
            4,
            1.4,
            4,
            &["analysis", "continuity"],
            "A continuous function attains every value between its endpoint values.",
        ),
        entity(
            "thm-evt",
            "Extreme Value Theorem",
            "theorem",
            4,
            1.3,
            3,
            &["analysis", "continuity", "compactness"],
            "A continuous function on a compact set attains a maximum and minimum.",
        ),
        entity(
            "thm-mvt",
            "Mean Value Theorem",
            "theorem",
            4,
            1.4,
            4,
            &["analysis", "calculus"],
            "Somewhere the instantaneous rate equals the average rate.",
        ),
        entity(
            "thm-cantor",
            "Cantor's Theorem",
            "theorem",
            4,
            1.3,
            3,
            &["set-theory", "cardinality"],
            "Every set is strictly smaller than its power set.",
        ),
        entity(
            "thm-lagrange",
            "Lagrange's Theorem",
            "theorem",
            4,
            1.2,
            2,
            &["algebra", "groups"],
            "The order of a subgroup divides the order of a finite group.",
        ),
        entity(
            "cor-uncountable-reals",
            "Uncountability of the Reals",
            "corollary",
            5,
            1.2,
            2,
            &["set-theory", "cardinality", "real-numbers"],
            "The real numbers are uncountable.",
        ),
        entity(
            "cor-fixed-point",
            "One-Dimensional Fixed Point",
            "corollary",
            5,
            1.0,
            1,
            &["analysis", "continuity"],
            "A continuous self-map of a closed interval has a fixed point.",
        ),
        entity(
            "cor-lipschitz-constant",
            "Bounded Derivative Gives Lipschitz",
            "corollary",
            5,
            1.0,
            1,
            &["analysis", "calculus"],
            "A function with bounded derivative is Lipschitz continuous.",
        ),
        entity(
            "cor-prime-order",
            "Groups of Prime Order",
            "corollary",
            5,
            1.0,
            1,
            &["algebra", "groups"],
            "A group of prime order is cyclic.",
        ),
    ];

    let relations = vec![
        relation("def-function", "ax-extensionality", "depends_on"),
        relation("def-function", "ax-pairing", "depends_on"),
        relation("def-function", "ax-powerset", "depends_on"),
        relation("def-partial-order", "def-function", "depends_on"),
        relation("def-bound", "def-partial-order", "depends_on"),
        relation("def-sequence-limit", "def-function", "depends_on"),
        relation("def-sequence-limit", "ax-completeness", "depends_on"),
        relation("def-continuity", "def-sequence-limit", "depends_on"),
        relation("def-derivative", "def-sequence-limit", "depends_on"),
        relation("def-derivative", "def-continuity", "depends_on"),
        relation("def-metric-space", "def-function", "depends_on"),
        relation("def-compactness", "def-metric-space", "depends_on"),
        relation("def-group", "def-function", "depends_on"),
        relation("def-cardinality", "def-function", "depends_on"),
        relation("def-cardinality", "ax-infinity", "depends_on"),
        relation("lem-zorn", "ax-choice", "depends_on"),
        relation("lem-zorn", "def-partial-order", "depends_on"),
        relation("lem-nested-intervals", "ax-completeness", "depends_on"),
        relation("lem-cauchy-criterion", "ax-completeness", "depends_on"),
        relation("lem-cauchy-criterion", "def-sequence-limit", "depends_on"),
        relation("lem-rolle", "def-derivative", "depends_on"),
        relation("lem-zorn", "thm-well-ordering", "proves"),
        relation("ax-choice", "thm-well-ordering", "proves"),
        relation("lem-nested-intervals", "thm-bolzano-weierstrass", "proves"),
        relation("def-bound", "thm-bolzano-weierstrass", "proves"),
        relation("thm-bolzano-weierstrass", "thm-heine-borel", "proves"),
        relation("def-compactness", "thm-heine-borel", "depends_on"),
        relation("ax-completeness", "thm-ivt", "proves"),
        relation("def-continuity", "thm-ivt", "depends_on"),
        relation("thm-heine-borel", "thm-evt", "proves"),
        relation("def-continuity", "thm-evt", "depends_on"),
        relation("lem-rolle", "thm-mvt", "proves"),
        relation("thm-evt", "lem-rolle", "proves"),
        relation("def-cardinality", "thm-cantor", "depends_on"),
        relation("ax-powerset", "thm-cantor", "depends_on"),
        relation("def-group", "thm-lagrange", "depends_on"),
        relation("thm-cantor", "cor-uncountable-reals", "proves"),
        relation("lem-nested-intervals", "cor-uncountable-reals", "proves"),
        relation("thm-ivt", "cor-fixed-point", "proves"),
        relation("thm-mvt", "cor-lipschitz-constant", "proves"),
        relation("thm-lagrange", "cor-prime-order", "proves"),
        relation("thm-heine-borel", "lem-nested-intervals", "generalizes"),
        relation("def-metric-space", "ax-completeness", "generalizes"),
        relation("thm-well-ordering", "ax-peano", "generalizes"),
    ];

    let mut details = HashMap::new();
    details.insert(
        "ax-choice".to_string(),
        detail(
            "For every family (S_i) of nonempty sets there is a function f with f(i) in S_i for all i.",
            "Independent of the remaining ZF axioms; equivalent to Zorn's lemma and to the well-ordering theorem.",
        ),
    );
    details.insert(
        "ax-completeness".to_string(),
        detail(
            "Every nonempty subset of R that is bounded above has a least upper bound in R.",
            "The property separating the reals from the rationals; most convergence arguments in this graph trace back here.",
        ),
    );
    details.insert(
        "lem-zorn".to_string(),
        detail(
            "If every chain in a nonempty partially ordered set P has an upper bound in P, then P has a maximal element.",
            "The standard workhorse for existence proofs where no explicit construction is available.",
        ),
    );
    details.insert(
        "thm-bolzano-weierstrass".to_string(),
        detail(
            "Every bounded sequence of real numbers has a convergent subsequence.",
            "Proved by repeated bisection using the nested interval lemma.",
        ),
    );
    details.insert(
        "thm-ivt".to_string(),
        detail(
            "If f is continuous on [a, b] and y lies between f(a) and f(b), then f(c) = y for some c in [a, b].",
            "A direct consequence of completeness; fails over the rationals.",
        ),
    );
    details.insert(
        "thm-cantor".to_string(),
        detail(
            "For every set S there is no surjection from S onto its power set.",
            "The diagonal argument; iterating it yields an unbounded hierarchy of infinite cardinalities.",
        ),
    );
    details.insert(
        "thm-mvt".to_string(),
        detail(
            "If f is continuous on [a, b] and differentiable on (a, b), then f'(c) = (f(b) - f(a)) / (b - a) for some c.",
            "Obtained from Rolle's lemma by subtracting the secant line.",
        ),
    );
    details.insert(
        "cor-uncountable-reals".to_string(),
        detail(
            "There is no surjection from the natural numbers onto the real numbers.",
            "Follows from Cantor's theorem, or directly by the diagonal argument on decimal expansions.",
        ),
    );

    let dataset = DatasetFile {
        entities,
        relations,
        details,
    };

    build_graph(dataset).expect("builtin dataset is valid")
}
