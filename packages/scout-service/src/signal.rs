use scout_config::{Collections, SignalWeights};

/// One semantic facet of a creator, searched in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
	Niche,
	Style,
	Audience,
}
impl SignalType {
	/// Search, fusion and error reporting all walk signals in this order.
	pub const ALL: [Self; 3] = [Self::Niche, Self::Style, Self::Audience];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Niche => "niche",
			Self::Style => "style",
			Self::Audience => "audience",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Niche => "Niche",
			Self::Style => "Style",
			Self::Audience => "Audience",
		}
	}

	pub fn collection(self, collections: &Collections) -> &str {
		match self {
			Self::Niche => collections.niche.as_str(),
			Self::Style => collections.style.as_str(),
			Self::Audience => collections.audience.as_str(),
		}
	}

	pub fn weight(self, weights: &SignalWeights) -> f32 {
		match self {
			Self::Niche => weights.niche,
			Self::Style => weights.style,
			Self::Audience => weights.audience,
		}
	}
}
