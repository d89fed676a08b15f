/*
 * Responsibility
 * - middleware の公開インターフェース
 *   - http: 全ルート共通 (request id, trace, limit, timeout)
 *   - subscription_state: /subscriptions/{subscriptionid}/... 用の lifecycle gate
 */
pub mod http;
pub mod subscription_state;
