/*
 * Responsibility
 * - 認証 interceptor (basic / bearer)
 * - どちらも route ごとに Interceptor::wrap で掛ける。成功時は request を一切触らない
 */
pub mod basic;
pub mod bearer;
