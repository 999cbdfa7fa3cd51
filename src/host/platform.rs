//! Platform fact collection.
//!
//! `sysinfo` supplies the portable baseline (OS identity, memory, CPUs,
//! disks). Each OS then fills in what `sysinfo` cannot see: per-socket CPU
//! layout, caches, board/BIOS identity, display adapter and memory modules.
//! On Windows those come from CIM queries run through the host's bounded
//! command runner; on Linux from `/proc` and `/sys`.

use std::path::PathBuf;

use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

use super::{CpuPackage, DiskFacts, Host, PlatformFacts};

/// Collect a fresh snapshot of platform facts.
pub fn collect(host: &dyn Host) -> PlatformFacts {
    let mut facts = baseline();
    facts.system_volume = Some(system_volume(host));
    enrich(&mut facts, host);
    if facts.time_zone.is_none() {
        facts.time_zone = Some(utc_offset_label());
    }
    tracing::debug!(
        os = ?facts.os_caption,
        cpu_packages = facts.cpu_packages.len(),
        disks = facts.disks.len(),
        "collected platform facts"
    );
    facts
}

fn baseline() -> PlatformFacts {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_memory(MemoryRefreshKind::everything())
            .with_cpu(CpuRefreshKind::everything()),
    );

    let cpus = sys.cpus();
    let cpu_packages = match cpus.first() {
        Some(first) => vec![CpuPackage {
            name: non_empty(first.brand()),
            physical_cores: System::physical_core_count(),
            logical_processors: Some(cpus.len()),
            max_clock_mhz: Some(first.frequency()).filter(|f| *f > 0),
            l2_cache: None,
            l3_cache: None,
        }],
        None => Vec::new(),
    };

    let disks = Disks::new_with_refreshed_list()
        .list()
        .iter()
        .map(|disk| DiskFacts {
            mount_point: disk.mount_point().to_path_buf(),
            name: disk.name().to_string_lossy().into_owned(),
            file_system: disk.file_system().to_string_lossy().into_owned(),
            total_bytes: disk.total_space(),
            available_bytes: disk.available_space(),
            removable: disk.is_removable(),
        })
        .collect();

    PlatformFacts {
        host_name: System::host_name(),
        os_name: System::name(),
        os_caption: System::long_os_version(),
        os_version: System::os_version(),
        os_build: System::kernel_version(),
        architecture: Some(std::env::consts::ARCH.to_string()),
        total_memory_bytes: Some(sys.total_memory()).filter(|m| *m > 0),
        cpu_packages,
        disks,
        ..Default::default()
    }
}

/// Root of the volume the OS is installed on.
fn system_volume(host: &dyn Host) -> PathBuf {
    if cfg!(windows) {
        let drive = host
            .env_var("SystemDrive")
            .unwrap_or_else(|| "C:".to_string());
        PathBuf::from(format!("{}\\", drive.trim_end_matches('\\')))
    } else {
        PathBuf::from("/")
    }
}

fn utc_offset_label() -> String {
    format!("UTC{}", chrono::Local::now().format("%:z"))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(target_os = "linux")]
fn enrich(facts: &mut PlatformFacts, host: &dyn Host) {
    linux::enrich(facts, host);
}

#[cfg(windows)]
fn enrich(facts: &mut PlatformFacts, host: &dyn Host) {
    windows::enrich(facts, host);
}

#[cfg(not(any(target_os = "linux", windows)))]
fn enrich(facts: &mut PlatformFacts, host: &dyn Host) {
    facts.time_zone = host.env_var("TZ");
}

#[cfg(target_os = "linux")]
mod linux {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;

    use super::super::{CpuPackage, FirmwareFacts, Host, PlatformFacts};
    use super::non_empty;

    pub(super) fn enrich(facts: &mut PlatformFacts, host: &dyn Host) {
        if let Ok(cpuinfo) = fs::read_to_string("/proc/cpuinfo") {
            let mut packages = parse_cpuinfo(&cpuinfo);
            if !packages.is_empty() {
                let max_clock = read_trimmed(
                    "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq",
                )
                .and_then(|khz| khz.parse::<u64>().ok())
                .map(|khz| khz / 1000);
                let (l2, l3) = read_caches(Path::new("/sys/devices/system/cpu/cpu0/cache"));
                for package in &mut packages {
                    package.max_clock_mhz = max_clock.or(package.max_clock_mhz);
                    package.l2_cache = l2.clone();
                    package.l3_cache = l3.clone();
                }
                facts.cpu_packages = packages;
            }
        }

        facts.firmware = FirmwareFacts {
            board_vendor: read_trimmed("/sys/class/dmi/id/board_vendor"),
            board_product: read_trimmed("/sys/class/dmi/id/board_name"),
            bios_vendor: read_trimmed("/sys/class/dmi/id/bios_vendor"),
            bios_version: read_trimmed("/sys/class/dmi/id/bios_version"),
        };
        facts.display_adapter = display_adapter(Path::new("/sys/class/drm"));
        facts.time_zone = host
            .env_var("TZ")
            .or_else(|| read_trimmed("/etc/timezone"))
            .or_else(localtime_zone);
    }

    /// Group `/proc/cpuinfo` processors by `physical id`.
    pub(super) fn parse_cpuinfo(content: &str) -> Vec<CpuPackage> {
        let mut packages: BTreeMap<u32, CpuPackage> = BTreeMap::new();

        for block in content.split("\n\n") {
            let mut physical_id = 0;
            let mut name = None;
            let mut cores = None;
            let mut mhz = None;
            let mut is_processor = false;

            for line in block.lines() {
                let Some((key, value)) = line.split_once(':') else {
                    continue;
                };
                let value = value.trim();
                match key.trim() {
                    "processor" => is_processor = true,
                    "physical id" => physical_id = value.parse().unwrap_or(0),
                    "model name" => name = non_empty(value),
                    "cpu cores" => cores = value.parse().ok(),
                    "cpu MHz" => mhz = value.parse::<f64>().ok().map(|m| m as u64),
                    _ => {}
                }
            }

            if !is_processor {
                continue;
            }
            let package = packages.entry(physical_id).or_default();
            package.logical_processors = Some(package.logical_processors.unwrap_or(0) + 1);
            package.name = package.name.take().or(name);
            package.physical_cores = package.physical_cores.or(cores);
            package.max_clock_mhz = package.max_clock_mhz.max(mhz);
        }

        packages.into_values().collect()
    }

    fn read_caches(cache_dir: &Path) -> (Option<String>, Option<String>) {
        let mut l2 = None;
        let mut l3 = None;
        for index in 0..8 {
            let dir = cache_dir.join(format!("index{}", index));
            let (Some(level), Some(size)) = (
                read_trimmed(dir.join("level")),
                read_trimmed(dir.join("size")),
            ) else {
                continue;
            };
            match level.as_str() {
                "2" => l2 = Some(size),
                "3" => l3 = Some(size),
                _ => {}
            }
        }
        (l2, l3)
    }

    fn display_adapter(drm: &Path) -> Option<String> {
        let mut cards: Vec<String> = fs::read_dir(drm)
            .ok()?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n.starts_with("card") && !n.contains('-'))
            .collect();
        cards.sort();

        cards.iter().find_map(|card| {
            let uevent = fs::read_to_string(drm.join(card).join("device/uevent")).ok()?;
            let field = |key: &str| {
                uevent
                    .lines()
                    .find_map(|l| l.strip_prefix(key).map(|v| v.to_string()))
            };
            match (field("DRIVER="), field("PCI_ID=")) {
                (Some(driver), Some(id)) => Some(format!("{} (PCI {})", driver, id)),
                (Some(driver), None) => Some(driver),
                _ => None,
            }
        })
    }

    fn localtime_zone() -> Option<String> {
        let target = fs::read_link("/etc/localtime").ok()?;
        let target = target.to_string_lossy();
        target
            .split_once("zoneinfo/")
            .map(|(_, zone)| zone.to_string())
    }

    fn read_trimmed(path: impl AsRef<Path>) -> Option<String> {
        fs::read_to_string(path).ok().and_then(|s| non_empty(&s))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const TWO_SOCKETS: &str = "processor\t: 0\nphysical id\t: 0\nmodel name\t: Xeon Gold\ncpu cores\t: 2\ncpu MHz\t\t: 2100.000\n\nprocessor\t: 1\nphysical id\t: 0\nmodel name\t: Xeon Gold\ncpu cores\t: 2\n\nprocessor\t: 2\nphysical id\t: 1\nmodel name\t: Xeon Gold\ncpu cores\t: 2\n\nprocessor\t: 3\nphysical id\t: 1\nmodel name\t: Xeon Gold\ncpu cores\t: 2\n";

        #[test]
        fn parse_cpuinfo_groups_by_socket() {
            let packages = parse_cpuinfo(TWO_SOCKETS);
            assert_eq!(packages.len(), 2);
            assert_eq!(packages[0].logical_processors, Some(2));
            assert_eq!(packages[1].logical_processors, Some(2));
            assert_eq!(packages[0].physical_cores, Some(2));
            assert_eq!(packages[0].name.as_deref(), Some("Xeon Gold"));
            assert_eq!(packages[0].max_clock_mhz, Some(2100));
        }

        #[test]
        fn parse_cpuinfo_without_physical_id_is_one_socket() {
            let content = "processor\t: 0\nmodel name\t: ARMv8\n\nprocessor\t: 1\nmodel name\t: ARMv8\n";
            let packages = parse_cpuinfo(content);
            assert_eq!(packages.len(), 1);
            assert_eq!(packages[0].logical_processors, Some(2));
        }

        #[test]
        fn parse_cpuinfo_empty_input() {
            assert!(parse_cpuinfo("").is_empty());
        }
    }
}

#[cfg(windows)]
mod windows {
    use super::super::{CpuPackage, FirmwareFacts, Host, PlatformFacts};
    use super::non_empty;

    pub(super) fn enrich(facts: &mut PlatformFacts, host: &dyn Host) {
        let processors = cim_rows(
            host,
            "Win32_Processor",
            &[
                "Name",
                "NumberOfCores",
                "NumberOfLogicalProcessors",
                "MaxClockSpeed",
                "L2CacheSize",
                "L3CacheSize",
            ],
        );
        if !processors.is_empty() {
            facts.cpu_packages = processors
                .iter()
                .map(|row| CpuPackage {
                    name: field(row, 0),
                    physical_cores: field(row, 1).and_then(|v| v.parse().ok()),
                    logical_processors: field(row, 2).and_then(|v| v.parse().ok()),
                    max_clock_mhz: field(row, 3).and_then(|v| v.parse().ok()),
                    l2_cache: field(row, 4).map(|kb| format!("{}K", kb)),
                    l3_cache: field(row, 5).map(|kb| format!("{}K", kb)),
                })
                .collect();
        }

        let board = cim_rows(host, "Win32_BaseBoard", &["Manufacturer", "Product"]);
        let bios = cim_rows(host, "Win32_BIOS", &["Manufacturer", "SMBIOSBIOSVersion"]);
        facts.firmware = FirmwareFacts {
            board_vendor: board.first().and_then(|r| field(r, 0)),
            board_product: board.first().and_then(|r| field(r, 1)),
            bios_vendor: bios.first().and_then(|r| field(r, 0)),
            bios_version: bios.first().and_then(|r| field(r, 1)),
        };

        facts.display_adapter = cim_rows(host, "Win32_VideoController", &["Name"])
            .first()
            .and_then(|r| field(r, 0));

        facts.memory_modules = cim_rows(
            host,
            "Win32_PhysicalMemory",
            &["Manufacturer", "Capacity", "Speed"],
        )
        .iter()
        .map(|row| {
            let vendor = field(row, 0).unwrap_or_else(|| "Unknown".to_string());
            let gb = field(row, 1)
                .and_then(|b| b.parse::<u64>().ok())
                .map(|b| b / (1024 * 1024 * 1024))
                .unwrap_or(0);
            match field(row, 2) {
                Some(speed) => format!("{} {} GB @ {} MHz", vendor, gb, speed),
                None => format!("{} {} GB", vendor, gb),
            }
        })
        .collect();

        facts.time_zone = cim_rows(host, "Win32_TimeZone", &["Caption"])
            .first()
            .and_then(|r| field(r, 0));

        if let Some(os) = cim_rows(host, "Win32_OperatingSystem", &["Caption", "BuildNumber"]).first()
        {
            facts.os_caption = field(os, 0).or(facts.os_caption.take());
            facts.os_build = field(os, 1).or(facts.os_build.take());
        }
    }

    /// Query a CIM class, one `|`-separated line per instance.
    fn cim_rows(host: &dyn Host, class: &str, properties: &[&str]) -> Vec<Vec<String>> {
        let select = properties
            .iter()
            .map(|p| format!("[string]$_.{}", p))
            .collect::<Vec<_>>()
            .join(" + '|' + ");
        let script = format!(
            "Get-CimInstance -ClassName {} | ForEach-Object {{ {} }}",
            class, select
        );
        let args = [
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            script,
        ];

        let Some(output) = host.run("powershell", &args) else {
            tracing::warn!(class, "CIM query failed");
            return Vec::new();
        };
        if !output.success {
            tracing::warn!(class, stderr = %output.stderr.trim(), "CIM query failed");
            return Vec::new();
        }
        output
            .stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split('|').map(|c| c.trim().to_string()).collect())
            .collect()
    }

    fn field(row: &[String], index: usize) -> Option<String> {
        row.get(index).and_then(|v| non_empty(v))
    }
}
