pub mod stage1_normalize;
pub mod stage2_filter;
pub mod stage3_rank;
pub mod stage4_aggregate;
pub mod stage5_correlation;
pub mod stage6_views;
pub mod stage7_export;
