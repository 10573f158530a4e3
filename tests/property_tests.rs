use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rapid_pagerank::{transition_model, Corpus, IterativePageRank, SamplingPageRank};

/// Random valid corpus: up to 8 pages, arbitrary links, self-links removed.
fn corpus_strategy() -> impl Strategy<Value = Corpus> {
    (1usize..8)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(any::<bool>(), n), n))
        .prop_map(|matrix| {
            let n = matrix.len();
            let links = matrix.iter().enumerate().map(|(i, row)| {
                let targets: Vec<String> = (0..n)
                    .filter(|&j| j != i && row[j])
                    .map(|j| format!("p{j}"))
                    .collect();
                (format!("p{i}"), targets)
            });
            Corpus::from_links(links).unwrap()
        })
}

fn l1(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

proptest! {
    #[test]
    fn prop_transition_sums_to_one(corpus in corpus_strategy(), damping in 0.01f64..0.99) {
        for page in corpus.page_ids() {
            let dist = transition_model(&corpus, page, damping).unwrap();
            prop_assert_eq!(dist.len(), corpus.len());
            prop_assert!(dist.as_slice().iter().all(|&p| p >= 0.0));
            prop_assert!((dist.total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_dangling_pages_spread_uniformly(corpus in corpus_strategy(), damping in 0.0f64..=1.0) {
        let uniform = 1.0 / corpus.len() as f64;
        for page in corpus.dangling_pages() {
            let dist = transition_model(&corpus, page, damping).unwrap();
            for p in corpus.page_ids() {
                prop_assert!((dist.prob(p) - uniform).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn prop_sampling_counts_sum_to_n(corpus in corpus_strategy(), n in 1usize..500, seed in any::<u64>()) {
        let sampler = SamplingPageRank::new().with_samples(n);
        let visits = sampler.visit_counts(&corpus, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(visits.iter().sum::<u64>(), n as u64);

        let result = sampler.run(&corpus, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert!((result.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_sampling_seed_reproducible(corpus in corpus_strategy(), seed in any::<u64>()) {
        let sampler = SamplingPageRank::new().with_samples(200).with_seed(seed);
        prop_assert_eq!(sampler.run_seeded(&corpus).unwrap(), sampler.run_seeded(&corpus).unwrap());
    }

    #[test]
    fn prop_iteration_sums_to_one(corpus in corpus_strategy(), damping in 0.0f64..0.95) {
        let result = IterativePageRank::new().with_damping(damping).run(&corpus).unwrap();
        prop_assert!(result.converged);
        prop_assert!((result.sum() - 1.0).abs() < 1e-6);
        prop_assert!(result.scores.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn prop_iteration_deterministic(corpus in corpus_strategy()) {
        let pr = IterativePageRank::new();
        prop_assert_eq!(pr.run(&corpus).unwrap(), pr.run(&corpus).unwrap());
    }

    #[test]
    fn prop_parallel_iteration_matches(corpus in corpus_strategy()) {
        let pr = IterativePageRank::new();
        prop_assert_eq!(pr.run(&corpus).unwrap(), pr.run_parallel(&corpus).unwrap());
    }
}

#[test]
fn more_samples_track_iteration_more_closely() {
    let corpus = Corpus::from_links([
        ("1.html", vec!["2.html"]),
        ("2.html", vec!["1.html", "3.html"]),
        ("3.html", vec!["2.html", "4.html"]),
        ("4.html", vec!["2.html"]),
        ("5.html", vec![]),
    ])
    .unwrap();
    let reference = IterativePageRank::new()
        .with_threshold(1e-10)
        .run(&corpus)
        .unwrap();

    let mean_deviation = |samples: usize| -> f64 {
        let trials = 20;
        (0..trials)
            .map(|seed| {
                let result = SamplingPageRank::new()
                    .with_samples(samples)
                    .with_seed(seed)
                    .run_seeded(&corpus)
                    .unwrap();
                l1(&result.scores, &reference.scores)
            })
            .sum::<f64>()
            / trials as f64
    };

    let small = mean_deviation(100);
    let medium = mean_deviation(1_000);
    let large = mean_deviation(20_000);

    assert!(small > medium, "{small} <= {medium}");
    assert!(medium > large, "{medium} <= {large}");
    assert!(large < 0.05);
}

#[test]
fn estimators_agree_on_star() {
    let corpus = Corpus::from_links([
        ("hub", vec![]),
        ("s1", vec!["hub"]),
        ("s2", vec!["hub"]),
        ("s3", vec!["hub"]),
    ])
    .unwrap();

    let iterated = IterativePageRank::new().run(&corpus).unwrap();
    let sampled = SamplingPageRank::new()
        .with_samples(50_000)
        .with_walkers(4)
        .with_seed(2024)
        .run_parallel(&corpus)
        .unwrap();

    assert!(l1(&iterated.scores, &sampled.scores) < 0.05);
}
