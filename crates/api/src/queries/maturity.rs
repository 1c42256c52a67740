//! Fixed-rate operations at maturity.

use alloy_primitives::Address;
use exa_rates_sim::{MaturityOperation, RateType};

use super::{take_list, QueryRequest, ResponseData};
use crate::error::Result;
use crate::types::entities::MaturityEvent;
use crate::types::scalars::format_address;

const OPERATION_NAME: &str = "MaturityOperations";
const FIELDS: &str = "timestamp maturity assets fee";

/// Entity holding the fixed operations of one side of the market.
pub fn entity(rate_type: RateType) -> &'static str {
    match rate_type {
        RateType::Deposit => "depositAtMaturities",
        RateType::Borrow => "borrowAtMaturities",
    }
}

/// Fixed deposits or borrows made since a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaturityQuery {
    pub rate_type: RateType,
    pub since: u64,
    /// Page size
    pub first: u32,
}

impl MaturityQuery {
    pub fn new(rate_type: RateType, since: u64) -> Self {
        Self {
            rate_type,
            since,
            first: 1000,
        }
    }

    pub fn build(&self, market: &Address) -> QueryRequest {
        let query = format!(
            "query {op}($market: Bytes!, $since: Int!) {{\n  {entity}(first: {first}, orderBy: timestamp, orderDirection: desc, where: {{ market: $market, timestamp_gte: $since }}) {{ {fields} }}\n}}",
            op = OPERATION_NAME,
            entity = entity(self.rate_type),
            first = self.first,
            fields = FIELDS,
        );

        QueryRequest {
            query,
            variables: serde_json::json!({
                "market": format_address(market),
                "since": self.since,
            }),
            operation_name: OPERATION_NAME.to_string(),
        }
    }

    pub fn parse(&self, mut data: ResponseData) -> Result<Vec<MaturityOperation>> {
        let events: Vec<MaturityEvent> = take_list(&mut data, entity(self.rate_type))?;
        Ok(events.into_iter().map(Into::into).collect())
    }
}
