use scout_service::{Error, FindCreatorsRequest};
use scout_testkit::{FakeIndex, FakeProfiles, FakeReranker, hit, profile, service, test_config};

const NICHE: &str = "niche-summaries";
const STYLE: &str = "style-summaries";
const AUDIENCE: &str = "target-audience-summaries";

#[tokio::test]
async fn overlapping_signals_merge_into_one_weighted_candidate() {
	let index = FakeIndex::new()
		.with_hits(NICHE, vec![hit("creator-x", 0.1, "Vegan meal prep.")])
		.with_hits(STYLE, vec![hit("creator-x", 0.5, "Fast cuts, bright kitchen.")]);
	let profiles = FakeProfiles::new().with_profile(profile("creator-x", "Xia", "@xia.eats", 4_200));
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("vegan cooking")).await;

	assert!(response.success);
	assert_eq!(response.creators.len(), 1);

	let creator = &response.creators[0];
	let expected = ((1.0 / 1.1) * 0.40 + (1.0 / 1.5) * 0.35) / 0.75;

	assert_eq!(creator.entity_id, "creator-x");
	assert!((creator.weighted_similarity - expected).abs() < 1e-5);
	assert_eq!(creator.niche_summary.as_deref(), Some("Vegan meal prep."));
	assert_eq!(creator.style_summary.as_deref(), Some("Fast cuts, bright kitchen."));
	assert_eq!(creator.audience_summary, None);
	assert_eq!(creator.creator_name, "Xia");
	assert_eq!(creator.followers_count, 4_200);
	assert_eq!(index.calls(), 3);
}

#[tokio::test]
async fn every_failed_signal_is_reported_in_order() {
	let index = FakeIndex::new()
		.with_failure(AUDIENCE, "collection missing")
		.with_failure(NICHE, "timed out")
		.with_failure(STYLE, "connection reset");
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("travel vlogs")).await;

	assert!(!response.success);
	assert_eq!(
		response.error.as_deref(),
		Some("Niche: timed out; Style: connection reset; Audience: collection missing")
	);
	assert!(response.creators.is_empty());
	assert_eq!(index.calls(), 3);
	assert_eq!(profiles.lookups(), 0);
	assert_eq!(reranker.calls(), 0);
}

#[tokio::test]
async fn one_failed_signal_discards_the_others() {
	let index = FakeIndex::new()
		.with_hits(NICHE, vec![hit("creator-a", 0.2, "Trail running.")])
		.with_failure(STYLE, "timed out")
		.with_hits(AUDIENCE, vec![hit("creator-b", 0.3, "Weekend hikers.")]);
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let err = service
		.try_find_creators(FindCreatorsRequest::new("outdoor creators"))
		.await
		.expect_err("Expected search failure.");

	match &err {
		Error::SearchFailure { failures } => assert_eq!(failures.len(), 1),
		other => panic!("Unexpected error: {other:?}"),
	}

	assert_eq!(err.to_string(), "Style: timed out");
	assert_eq!(reranker.calls(), 0);
}

#[tokio::test]
async fn rerank_failure_fails_the_query() {
	let index = FakeIndex::new().with_hits(NICHE, vec![hit("creator-a", 0.2, "Street food.")]);
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::failing("upstream returned 503");
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("street food")).await;

	assert!(!response.success);
	assert_eq!(response.error.as_deref(), Some("Failed to rerank documents: upstream returned 503"));
	assert!(response.creators.is_empty());
	assert_eq!(reranker.calls(), 1);
}

#[tokio::test]
async fn disjoint_hits_are_capped_and_ordered_by_relevance() {
	let index = FakeIndex::new()
		.with_hits(NICHE, vec![hit("n1", 0.1, "a"), hit("n2", 0.2, "b"), hit("n3", 0.3, "c")])
		.with_hits(STYLE, vec![hit("s1", 0.1, "d"), hit("s2", 0.2, "e"), hit("s3", 0.3, "f")])
		.with_hits(AUDIENCE, vec![hit("a1", 0.1, "g"), hit("a2", 0.2, "h")]);
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("anything")).await;

	assert!(response.success);
	assert_eq!(reranker.documents().len(), 8);
	assert_eq!(response.creators.len(), 6);
	assert!(
		response
			.creators
			.windows(2)
			.all(|pair| pair[0].relevance_score > pair[1].relevance_score)
	);
}

#[tokio::test]
async fn missing_profile_keeps_candidate_with_defaults() {
	let index = FakeIndex::new().with_hits(AUDIENCE, vec![hit("ghost", 0.0, "Gen Z gamers.")]);
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("gaming")).await;

	assert!(response.success);
	assert_eq!(response.creators.len(), 1);

	let creator = &response.creators[0];

	assert_eq!(creator.entity_id, "ghost");
	assert_eq!(creator.creator_name, "");
	assert_eq!(creator.handle, "");
	assert_eq!(creator.followers_count, 0);
	assert_eq!(creator.weighted_similarity, 1.0);
}

#[tokio::test]
async fn profile_store_errors_degrade_to_defaults() {
	let index = FakeIndex::new().with_hits(NICHE, vec![hit("creator-a", 0.4, "Bread baking.")]);
	let profiles = FakeProfiles::failing("pool timed out");
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("sourdough")).await;

	assert!(response.success);
	assert_eq!(response.creators.len(), 1);
	assert_eq!(response.creators[0].creator_name, "");
	assert_eq!(profiles.lookups(), 1);
}

#[tokio::test]
async fn reranker_sees_profile_and_summaries_only() {
	let index = FakeIndex::new()
		.with_hits(NICHE, vec![hit("creator-a", 0.2, "Budget travel.")])
		.with_hits(STYLE, vec![hit("creator-b", 0.1, "Drone shots.")]);
	let profiles = FakeProfiles::new()
		.with_profile(profile("creator-a", "Ana", "@ana.goes", 900))
		.with_profile(profile("creator-b", "Bo", "@bo.flies", 1_500));
	let reranker = FakeReranker::by_keywords(&[("@ana.goes", 0.9), ("@bo.flies", 0.2)]);
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("travel")).await;
	let documents = reranker.documents();

	assert!(response.success);
	assert_eq!(documents.len(), 2);
	assert!(documents.iter().all(|doc| doc.starts_with("creatorName: ")));
	assert!(documents.iter().all(|doc| !doc.contains("creator-a") && !doc.contains("creator-b")));
	assert!(documents.iter().any(|doc| doc.contains("nicheSummary: Budget travel.")));

	let ids: Vec<&str> = response.creators.iter().map(|c| c.entity_id.as_str()).collect();

	assert_eq!(ids, vec!["creator-a", "creator-b"]);
	assert_eq!(response.creators[0].relevance_score, 0.9);
}

#[tokio::test]
async fn weighted_mode_skips_the_reranker() {
	let mut cfg = test_config();

	cfg.ranking.mode = "weighted".to_string();
	cfg.search.top_k = 2;

	let index = FakeIndex::new()
		.with_hits(NICHE, vec![hit("far", 3.0, "a"), hit("near", 0.0, "b")])
		.with_hits(STYLE, vec![hit("mid", 1.0, "c")]);
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(cfg, &index, &profiles, &reranker);
	let creators = service
		.try_find_creators(FindCreatorsRequest::new("anything"))
		.await
		.expect("Weighted ranking failed.");
	let ids: Vec<&str> = creators.iter().map(|c| c.entity_id.as_str()).collect();

	assert_eq!(ids, vec!["near", "mid"]);
	assert!(creators.iter().all(|c| c.relevance_score == c.weighted_similarity));
	assert_eq!(reranker.calls(), 0);
}

#[tokio::test]
async fn request_overrides_caps() {
	let index = FakeIndex::new().with_hits(
		NICHE,
		vec![hit("a", 0.1, "x"), hit("b", 0.2, "y"), hit("c", 0.3, "z"), hit("d", 0.4, "w")],
	);
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service
		.find_creators(FindCreatorsRequest {
			query: "anything".to_string(),
			top_k: Some(1),
			k: Some(3),
		})
		.await;

	assert!(response.success);
	assert_eq!(index.requested_k(), vec![3, 3, 3]);
	assert_eq!(reranker.documents().len(), 3);
	assert_eq!(response.creators.len(), 1);
}

#[tokio::test]
async fn empty_index_returns_no_creators_without_reranking() {
	let index = FakeIndex::new();
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("nothing indexed")).await;

	assert!(response.success);
	assert!(response.creators.is_empty());
	assert_eq!(reranker.calls(), 0);
}

#[tokio::test]
async fn blank_query_is_rejected_before_searching() {
	let index = FakeIndex::new();
	let profiles = FakeProfiles::new();
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let err = service
		.try_find_creators(FindCreatorsRequest::new("   "))
		.await
		.expect_err("Expected invalid request.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert_eq!(index.calls(), 0);
}

#[tokio::test]
async fn response_body_uses_camel_case_fields() {
	let index = FakeIndex::new().with_hits(NICHE, vec![hit("creator-a", 0.0, "Skincare.")]);
	let profiles =
		FakeProfiles::new().with_profile(profile("creator-a", "Ana", "@ana.glow", 12_000));
	let reranker = FakeReranker::by_position();
	let service = service(test_config(), &index, &profiles, &reranker);
	let response = service.find_creators(FindCreatorsRequest::new("skincare")).await;
	let body = serde_json::to_value(&response).expect("Failed to serialize response.");

	assert_eq!(body["success"], true);
	assert!(body.get("error").is_none());

	let creator = &body["creators"][0];

	assert_eq!(creator["id"], "creator-a");
	assert_eq!(creator["creatorName"], "Ana");
	assert_eq!(creator["platformId"], "instagram");
	assert_eq!(creator["followersCount"], 12_000);
	assert_eq!(creator["profileImage"], "https://cdn.scout.test/creator-a.png");
	assert_eq!(creator["nicheSummary"], "Skincare.");
	assert_eq!(creator["weightedSimilarity"], 1.0);
	assert_eq!(creator["relevanceScore"], 1.0);
	assert!(creator.get("styleSummary").is_none());
}
