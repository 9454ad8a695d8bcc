// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::renderer::api::RenderingApi;

/// Answers whether a rendering API can be used on this build and platform.
///
/// A concrete implementation lives in `lumen-infra` and combines the enabled
/// cargo features with the target OS.
pub trait BackendSupport {
    /// Returns `true` if `api` can be initialized.
    fn is_backend_supported(&self, api: RenderingApi) -> bool;

    /// Every supported API, in fallback priority order.
    fn supported_backends(&self) -> Vec<RenderingApi> {
        RenderingApi::FALLBACK_ORDER
            .into_iter()
            .filter(|&api| self.is_backend_supported(api))
            .collect()
    }
}
